//! End-to-end navigation scenarios: real flows, real screens, driven the way
//! the terminal host drives them (input to the visible screen, then
//! `process_pending`).

use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use zyna::TabKind;
use zyna::core::session::{Session, SessionStore};
use zyna::flows::{AppContext, AppFlow, AppStep, ChatsFlow, ChatsStep, NavStep, Zyna};
use zyna::nav::{
    CoordinatorState, Flow, FlowCoordinator, Presentable, PresentableId, Stepper,
};
use zyna::screens::{ScreenInput, sample_chats};

fn scratch_sessions() -> SessionStore {
    SessionStore::new(
        std::env::temp_dir()
            .join(format!("zyna-it-{}", uuid::Uuid::new_v4()))
            .join("session.json"),
    )
}

fn context(tab: TabKind) -> AppContext {
    AppContext::new(scratch_sessions(), tab, "Guest")
}

fn start(step: AppStep, tab: TabKind) -> FlowCoordinator<Zyna> {
    let mut coordinator = FlowCoordinator::new();
    coordinator
        .start(AppFlow::new(context(tab)), NavStep::App(step))
        .unwrap();
    coordinator
}

fn visible_title(coordinator: &FlowCoordinator<Zyna>) -> Option<String> {
    coordinator
        .root()?
        .visible_screen()
        .map(|screen| screen.view().title())
}

fn press(coordinator: &mut FlowCoordinator<Zyna>, input: ScreenInput) -> usize {
    let screen = coordinator
        .root()
        .and_then(|root| root.visible_screen())
        .expect("a visible screen");
    screen.view().handle_input(input);
    coordinator.process_pending()
}

fn reachable(coordinator: &FlowCoordinator<Zyna>) -> HashSet<PresentableId> {
    let mut seen = HashSet::new();
    if let Some(root) = coordinator.root() {
        root.collect_reachable(&mut seen);
    }
    seen
}

/// Every registration tracks a distinct, reachable presentable.
fn assert_registry_matches_tree(coordinator: &FlowCoordinator<Zyna>) {
    let tracked = coordinator.tracked_presentables();
    assert_eq!(coordinator.registry_len(), tracked.len());
    assert!(tracked.is_subset(&reachable(coordinator)));
}

#[test]
fn auth_then_main_replaces_root_with_tab_root() {
    let mut coordinator = start(AppStep::Auth, TabKind::Chats);
    assert_eq!(coordinator.state(), CoordinatorState::Running);
    assert_eq!(visible_title(&coordinator).as_deref(), Some("Welcome"));
    // Root kick plus the auth screen.
    assert_eq!(coordinator.registry_len(), 2);

    assert_eq!(press(&mut coordinator, ScreenInput::Select), 1);

    let Some(Presentable::Stack(root)) = coordinator.root() else {
        panic!("app root is a stack");
    };
    assert_eq!(root.len(), 1);
    assert!(matches!(root.top(), Some(Presentable::Tabs(_))));
    assert_eq!(visible_title(&coordinator).as_deref(), Some("Chats"));
    assert_eq!(
        coordinator.flow_names(),
        ["app", "chats", "main", "profile", "settings"]
    );
    assert_registry_matches_tree(&coordinator);
}

#[test]
fn sign_in_persists_session_for_next_launch() {
    let ctx = context(TabKind::Chats);
    let sessions = ctx.sessions.clone();
    assert_eq!(zyna::flows::initial_step(&ctx, true), NavStep::App(AppStep::Auth));

    let mut coordinator = FlowCoordinator::new();
    coordinator
        .start(AppFlow::new(ctx.clone()), NavStep::App(AppStep::Auth))
        .unwrap();
    press(&mut coordinator, ScreenInput::Backspace);
    press(&mut coordinator, ScreenInput::Char('!'));
    press(&mut coordinator, ScreenInput::Select);

    let saved: Session = sessions.load().unwrap().expect("session saved on sign-in");
    assert_eq!(saved.display_name, "Gues!");
    assert_eq!(zyna::flows::initial_step(&ctx, true), NavStep::App(AppStep::Main));
}

#[test]
fn tab_fan_out_registers_every_tab() {
    let coordinator = start(AppStep::Main, TabKind::Chats);

    // Root kick, main kick, three tab kicks, three tab screens.
    assert_eq!(coordinator.registry_len(), 8);
    assert_eq!(coordinator.flow_count(), 5);

    let Some(Presentable::Stack(root)) = coordinator.root() else {
        panic!("app root is a stack");
    };
    let Some(Presentable::Tabs(tabs)) = root.top() else {
        panic!("main flow shows a tab root");
    };
    let titles: Vec<String> = tabs.tabs().into_iter().map(|t| t.item.title).collect();
    assert_eq!(titles, ["Profile", "Chats", "Settings"]);
    assert_eq!(tabs.selected_index(), Some(1));

    let tracked = coordinator.tracked_presentables();
    for tab in tabs.tabs() {
        assert!(tracked.contains(&tab.content.id()));
    }
    assert_registry_matches_tree(&coordinator);
}

#[test]
fn initial_tab_setting_selects_tab() {
    let coordinator = start(AppStep::Main, TabKind::Profile);
    assert_eq!(visible_title(&coordinator).as_deref(), Some("Profile"));
}

#[test]
fn chat_push_and_back_reclaims_registration() {
    let mut coordinator = start(AppStep::Main, TabKind::Chats);
    let before = coordinator.registry_len();

    press(&mut coordinator, ScreenInput::Down);
    assert_eq!(press(&mut coordinator, ScreenInput::Select), 1);
    assert_eq!(visible_title(&coordinator).as_deref(), Some("Chat Bob Smith"));
    assert_eq!(coordinator.registry_len(), before + 1);

    let chat = coordinator.root().and_then(|r| r.visible_screen()).unwrap();
    assert!(coordinator.tracked_presentables().contains(&chat.id()));

    assert_eq!(press(&mut coordinator, ScreenInput::Back), 1);
    assert_eq!(visible_title(&coordinator).as_deref(), Some("Chats"));
    assert_eq!(coordinator.registry_len(), before);
    assert!(!coordinator.tracked_presentables().contains(&chat.id()));
    assert_registry_matches_tree(&coordinator);

    // The popped screen's stepper lost its subscriber; its steps go nowhere.
    chat.view().handle_input(ScreenInput::Back);
    assert_eq!(coordinator.process_pending(), 0);
    assert_eq!(visible_title(&coordinator).as_deref(), Some("Chats"));
}

#[test]
fn back_on_chat_list_is_noop() {
    let mut coordinator = start(AppStep::Main, TabKind::Chats);
    let before = coordinator.tracked_presentables();
    press(&mut coordinator, ScreenInput::Back);
    assert_eq!(coordinator.tracked_presentables(), before);
}

#[test]
fn unknown_chat_is_contained() {
    let flow = ChatsFlow::new(Rc::new(sample_chats()));
    let stack = flow.stack();
    let driver = Stepper::one(NavStep::Chats(ChatsStep::List));

    let mut coordinator = FlowCoordinator::new();
    coordinator.start_with(flow, driver.clone()).unwrap();
    let after_list = stack.ids();
    let registered = coordinator.registry_len();

    driver.emit(NavStep::Chats(ChatsStep::Chat {
        chat_id: "chat_404".to_string(),
    }));
    assert_eq!(coordinator.process_pending(), 1);
    assert_eq!(stack.ids(), after_list);
    assert_eq!(coordinator.registry_len(), registered);

    // The flow keeps working after the failure.
    driver.emit(NavStep::Chats(ChatsStep::Chat {
        chat_id: "chat_3".to_string(),
    }));
    coordinator.process_pending();
    assert_eq!(stack.len(), 2);
}

#[test]
fn redelivered_steps_yield_same_shape() {
    let mut flow = ChatsFlow::new(Rc::new(sample_chats()));
    let first = flow.navigate(&NavStep::Chats(ChatsStep::List)).unwrap();
    let second = flow.navigate(&NavStep::Chats(ChatsStep::List)).unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(flow.stack().len(), 1);
}

#[test]
fn opening_same_chat_twice_pushes_two_tracked_screens() {
    let mut coordinator = start(AppStep::Main, TabKind::Chats);
    let before = coordinator.registry_len();
    let list = coordinator
        .root()
        .and_then(|root| root.visible_screen())
        .expect("chat list is visible");

    // Both selections come from the list screen before anything is routed.
    list.view().handle_input(ScreenInput::Select);
    list.view().handle_input(ScreenInput::Select);
    assert_eq!(coordinator.process_pending(), 2);

    let Some(Presentable::Stack(root)) = coordinator.root() else {
        panic!("app root is a stack");
    };
    let Some(Presentable::Tabs(tabs)) = root.top() else {
        panic!("main flow shows a tab root");
    };
    let Some(Presentable::Stack(chats)) = tabs.selected().map(|tab| tab.content) else {
        panic!("chats tab holds a stack");
    };
    assert_eq!(chats.len(), 3);
    assert_eq!(coordinator.registry_len(), before + 2);
    assert_eq!(visible_title(&coordinator).as_deref(), Some("Chat Alice Johnson"));
    assert_registry_matches_tree(&coordinator);
}

#[test]
fn steps_from_unregistered_stepper_are_dropped() {
    let mut coordinator = start(AppStep::Main, TabKind::Chats);
    let Some(Presentable::Stack(root)) = coordinator.root() else {
        panic!("app root is a stack");
    };
    let before = coordinator.tracked_presentables();

    let driver = Stepper::new();
    driver.emit(NavStep::App(AppStep::Main));
    assert_eq!(coordinator.process_pending(), 0);
    assert_eq!(root.len(), 1);
    assert_eq!(coordinator.tracked_presentables(), before);
}

#[test]
fn run_routes_steps_emitted_from_another_thread() {
    let flow = ChatsFlow::new(Rc::new(sample_chats()));
    let stack = flow.stack();
    let driver = Stepper::one(NavStep::Chats(ChatsStep::List));
    let mut coordinator = FlowCoordinator::new();
    coordinator.start_with(flow, driver.clone()).unwrap();

    let remote = driver.clone();
    std::thread::spawn(move || {
        remote.emit(NavStep::Chats(ChatsStep::Chat {
            chat_id: "chat_5".to_string(),
        }));
    })
    .join()
    .unwrap();

    let outcome = tokio_test::block_on(async {
        tokio::time::timeout(Duration::from_millis(50), coordinator.run()).await
    });
    assert!(outcome.is_err(), "run only returns when dropped");
    assert_eq!(stack.len(), 2);
}
