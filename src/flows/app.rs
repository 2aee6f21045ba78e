//! Root flow. Owns the window-level stack and swaps between sign-in and the
//! main tab root.

use std::rc::Rc;

use log::{info, warn};

use crate::nav::{
    Flow, FlowContributor, FlowContributors, NavigationError, NavigationStack, Presentable, Stepper,
};
use crate::screens::AuthScreen;

use super::main_flow::MainFlow;
use super::{AppContext, AppStep, MainStep, NavStep, Zyna, present};

pub struct AppFlow {
    ctx: AppContext,
    root: NavigationStack<Zyna>,
}

impl AppFlow {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            root: NavigationStack::new(),
        }
    }

    pub fn stack(&self) -> NavigationStack<Zyna> {
        self.root.clone()
    }

    fn navigate_to_auth(&mut self) -> FlowContributors<Zyna> {
        let screen = Rc::new(AuthScreen::new(self.ctx.sessions.clone(), &self.ctx.display_name));
        let stepper = screen.stepper();
        let presentable = present(screen);
        self.root.set(vec![presentable.clone()]);
        FlowContributors::One(FlowContributor::contribute(presentable, stepper))
    }

    fn navigate_to_main(&mut self) -> FlowContributors<Zyna> {
        let main = MainFlow::new(self.ctx.clone());
        self.root.set(vec![main.root()]);
        FlowContributors::One(FlowContributor::child_flow(
            main,
            Stepper::one(NavStep::Main(MainStep::TabBarRequired)),
        ))
    }
}

impl Flow<Zyna> for AppFlow {
    fn name(&self) -> &'static str {
        "app"
    }

    fn root(&self) -> Presentable<Zyna> {
        Presentable::Stack(self.root.clone())
    }

    fn navigate(&mut self, step: &NavStep) -> Result<FlowContributors<Zyna>, NavigationError> {
        match step {
            NavStep::App(AppStep::Auth) => {
                info!("Showing sign-in");
                Ok(self.navigate_to_auth())
            }
            NavStep::App(AppStep::Main) => {
                info!("Entering main tab root");
                Ok(self.navigate_to_main())
            }
            _ => Ok(FlowContributors::None),
        }
    }
}

/// The step the app starts with: straight to the tabs when a session is
/// remembered, sign-in otherwise. An unreadable session counts as none.
pub fn initial_step(ctx: &AppContext, remember_session: bool) -> NavStep {
    if !remember_session {
        return NavStep::App(AppStep::Auth);
    }
    match ctx.sessions.load() {
        Ok(Some(session)) => {
            info!("Resuming session for {}", session.display_name);
            NavStep::App(AppStep::Main)
        }
        Ok(None) => NavStep::App(AppStep::Auth),
        Err(e) => {
            warn!("Ignoring unreadable session: {e}");
            NavStep::App(AppStep::Auth)
        }
    }
}
