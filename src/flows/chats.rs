use std::rc::Rc;

use log::debug;

use crate::nav::{
    Flow, FlowContributor, FlowContributors, NavigationError, NavigationStack, Presentable,
};
use crate::screens::{Chat, ChatScreen, ChatsListScreen};

use super::{ChatsStep, NavStep, Zyna, present};

/// Chat roster with conversations pushed on top.
pub struct ChatsFlow {
    chats: Rc<Vec<Chat>>,
    root: NavigationStack<Zyna>,
}

impl ChatsFlow {
    pub fn new(chats: Rc<Vec<Chat>>) -> Self {
        Self {
            chats,
            root: NavigationStack::new(),
        }
    }

    pub fn stack(&self) -> NavigationStack<Zyna> {
        self.root.clone()
    }

    fn show_list(&mut self) -> FlowContributors<Zyna> {
        let screen = Rc::new(ChatsListScreen::new(Rc::clone(&self.chats)));
        let stepper = screen.stepper();
        let presentable = present(screen);
        self.root.set(vec![presentable.clone()]);
        FlowContributors::One(FlowContributor::contribute(presentable, stepper))
    }

    fn open_chat(&mut self, chat_id: &str) -> Result<FlowContributors<Zyna>, NavigationError> {
        let chat = self
            .chats
            .iter()
            .find(|chat| chat.id == chat_id)
            .cloned()
            .ok_or_else(|| NavigationError::build("chats", format!("no chat with id {chat_id}")))?;
        debug!("Opening chat {chat_id}");
        let screen = Rc::new(ChatScreen::new(chat));
        let stepper = screen.stepper();
        let presentable = present(screen);
        self.root.push(presentable.clone());
        Ok(FlowContributors::One(FlowContributor::contribute(presentable, stepper)))
    }
}

impl Flow<Zyna> for ChatsFlow {
    fn name(&self) -> &'static str {
        "chats"
    }

    fn root(&self) -> Presentable<Zyna> {
        Presentable::Stack(self.root.clone())
    }

    fn navigate(&mut self, step: &NavStep) -> Result<FlowContributors<Zyna>, NavigationError> {
        match step {
            NavStep::Chats(ChatsStep::List) => Ok(self.show_list()),
            NavStep::Chats(ChatsStep::Chat { chat_id }) => self.open_chat(chat_id),
            NavStep::Chats(ChatsStep::Back) => {
                self.root.pop();
                Ok(FlowContributors::None)
            }
            _ => Ok(FlowContributors::None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::{ProfileStep, SettingsStep};
    use crate::screens::sample_chats;
    use crate::test_support::top_title;

    fn chats_flow() -> ChatsFlow {
        ChatsFlow::new(Rc::new(sample_chats()))
    }

    fn chat_step(id: &str) -> NavStep {
        NavStep::Chats(ChatsStep::Chat {
            chat_id: id.to_string(),
        })
    }

    #[test]
    fn test_list_then_chat_then_back() {
        let mut flow = chats_flow();
        flow.navigate(&NavStep::Chats(ChatsStep::List)).unwrap();
        let opened = flow.navigate(&chat_step("chat_2")).unwrap();

        assert_eq!(opened.len(), 1);
        assert_eq!(flow.stack().len(), 2);
        assert_eq!(top_title(&flow.stack()).as_deref(), Some("Chat Charlie Brown"));

        let back = flow.navigate(&NavStep::Chats(ChatsStep::Back)).unwrap();
        assert!(back.is_empty());
        assert_eq!(flow.stack().len(), 1);
        assert_eq!(top_title(&flow.stack()).as_deref(), Some("Chats"));
    }

    #[test]
    fn test_back_on_list_is_noop() {
        let mut flow = chats_flow();
        flow.navigate(&NavStep::Chats(ChatsStep::List)).unwrap();
        let before = flow.stack().ids();
        flow.navigate(&NavStep::Chats(ChatsStep::Back)).unwrap();
        assert_eq!(flow.stack().ids(), before);
    }

    #[test]
    fn test_unknown_chat_is_an_error_and_stack_is_kept() {
        let mut flow = chats_flow();
        flow.navigate(&NavStep::Chats(ChatsStep::List)).unwrap();
        let before = flow.stack().ids();

        let err = flow.navigate(&chat_step("chat_404")).unwrap_err();
        assert!(matches!(err, NavigationError::Build { flow: "chats", .. }));
        assert_eq!(flow.stack().ids(), before);
    }

    #[test]
    fn test_list_redelivery_replaces_stack() {
        let mut flow = chats_flow();
        flow.navigate(&NavStep::Chats(ChatsStep::List)).unwrap();
        flow.navigate(&chat_step("chat_0")).unwrap();
        let again = flow.navigate(&NavStep::Chats(ChatsStep::List)).unwrap();
        assert_eq!(again.len(), 1);
        assert_eq!(flow.stack().len(), 1);
    }

    #[test]
    fn test_foreign_steps_are_ignored() {
        let mut flow = chats_flow();
        flow.navigate(&NavStep::Chats(ChatsStep::List)).unwrap();
        let before = flow.stack().ids();
        for step in [
            NavStep::Profile(ProfileStep::Profile),
            NavStep::Settings(SettingsStep::Settings),
        ] {
            assert!(flow.navigate(&step).unwrap().is_empty());
        }
        assert_eq!(flow.stack().ids(), before);
    }
}
