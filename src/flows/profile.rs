use std::rc::Rc;

use crate::core::session::Session;
use crate::nav::{
    Flow, FlowContributor, FlowContributors, NavigationError, NavigationStack, Presentable,
};
use crate::screens::ProfileScreen;

use super::{NavStep, ProfileStep, Zyna, present};

pub struct ProfileFlow {
    session: Option<Session>,
    default_name: String,
    root: NavigationStack<Zyna>,
}

impl ProfileFlow {
    pub fn new(session: Option<Session>, default_name: &str) -> Self {
        Self {
            session,
            default_name: default_name.to_string(),
            root: NavigationStack::new(),
        }
    }

    pub fn stack(&self) -> NavigationStack<Zyna> {
        self.root.clone()
    }
}

impl Flow<Zyna> for ProfileFlow {
    fn name(&self) -> &'static str {
        "profile"
    }

    fn root(&self) -> Presentable<Zyna> {
        Presentable::Stack(self.root.clone())
    }

    fn navigate(&mut self, step: &NavStep) -> Result<FlowContributors<Zyna>, NavigationError> {
        match step {
            NavStep::Profile(ProfileStep::Profile) => {
                let screen = Rc::new(ProfileScreen::new(self.session.as_ref(), &self.default_name));
                let stepper = screen.stepper();
                let presentable = present(screen);
                self.root.set(vec![presentable.clone()]);
                Ok(FlowContributors::One(FlowContributor::contribute(presentable, stepper)))
            }
            _ => Ok(FlowContributors::None),
        }
    }
}
