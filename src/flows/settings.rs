use std::rc::Rc;

use crate::nav::{
    Flow, FlowContributor, FlowContributors, NavigationError, NavigationStack, Presentable,
};
use crate::screens::SettingsScreen;

use super::{NavStep, SettingsStep, Zyna, present};

pub struct SettingsFlow {
    root: NavigationStack<Zyna>,
}

impl SettingsFlow {
    pub fn new() -> Self {
        Self {
            root: NavigationStack::new(),
        }
    }

    pub fn stack(&self) -> NavigationStack<Zyna> {
        self.root.clone()
    }
}

impl Default for SettingsFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl Flow<Zyna> for SettingsFlow {
    fn name(&self) -> &'static str {
        "settings"
    }

    fn root(&self) -> Presentable<Zyna> {
        Presentable::Stack(self.root.clone())
    }

    fn navigate(&mut self, step: &NavStep) -> Result<FlowContributors<Zyna>, NavigationError> {
        match step {
            NavStep::Settings(SettingsStep::Settings) => {
                let screen = Rc::new(SettingsScreen::new());
                let stepper = screen.stepper();
                let presentable = present(screen);
                self.root.set(vec![presentable.clone()]);
                Ok(FlowContributors::One(FlowContributor::contribute(presentable, stepper)))
            }
            _ => Ok(FlowContributors::None),
        }
    }
}
