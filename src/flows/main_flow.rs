//! Tab root. Builds the profile, chats and settings flows in one go and hands
//! all three to the coordinator.

use log::{info, warn};

use crate::TabKind;
use crate::nav::{
    Flow, FlowContributor, FlowContributors, NavigationError, Presentable, Stepper, Tab, TabBar,
    TabItem,
};

use super::chats::ChatsFlow;
use super::profile::ProfileFlow;
use super::settings::SettingsFlow;
use super::{AppContext, ChatsStep, MainStep, NavStep, ProfileStep, SettingsStep, Zyna};

pub struct MainFlow {
    ctx: AppContext,
    root: TabBar<Zyna>,
}

impl MainFlow {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            root: TabBar::new(),
        }
    }

    pub fn tabs(&self) -> TabBar<Zyna> {
        self.root.clone()
    }

    fn build_tabs(&mut self) -> FlowContributors<Zyna> {
        let session = self.ctx.sessions.load().unwrap_or_else(|e| {
            warn!("Profile falls back to the default name: {e}");
            None
        });
        let profile = ProfileFlow::new(session, &self.ctx.display_name);
        let chats = ChatsFlow::new(self.ctx.chats.clone());
        let settings = SettingsFlow::new();

        let roots = [profile.root(), chats.root(), settings.root()];
        let tabs = TabKind::ALL
            .iter()
            .zip(roots)
            .map(|(kind, content)| Tab {
                item: TabItem::new(kind.title(), kind.icon()),
                content,
            })
            .collect();
        self.root.set_tabs(tabs, self.ctx.initial_tab.index());
        info!("Tab root ready, {} selected", self.ctx.initial_tab);

        FlowContributors::Multiple(vec![
            FlowContributor::child_flow(
                profile,
                Stepper::one(NavStep::Profile(ProfileStep::Profile)),
            ),
            FlowContributor::child_flow(chats, Stepper::one(NavStep::Chats(ChatsStep::List))),
            FlowContributor::child_flow(
                settings,
                Stepper::one(NavStep::Settings(SettingsStep::Settings)),
            ),
        ])
    }
}

impl Flow<Zyna> for MainFlow {
    fn name(&self) -> &'static str {
        "main"
    }

    fn root(&self) -> Presentable<Zyna> {
        Presentable::Tabs(self.root.clone())
    }

    fn navigate(&mut self, step: &NavStep) -> Result<FlowContributors<Zyna>, NavigationError> {
        match step {
            NavStep::Main(MainStep::TabBarRequired) => Ok(self.build_tabs()),
            _ => Ok(FlowContributors::None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::AppStep;
    use crate::nav::NextPresentable;
    use crate::test_support::test_context;

    #[test]
    fn test_fan_out_builds_three_tabs_in_order() {
        let mut flow = MainFlow::new(test_context(TabKind::Chats));
        let contributors = flow.navigate(&NavStep::Main(MainStep::TabBarRequired)).unwrap();

        assert_eq!(contributors.len(), 3);
        let titles: Vec<String> = flow.tabs().tabs().into_iter().map(|t| t.item.title).collect();
        assert_eq!(titles, ["Profile", "Chats", "Settings"]);
        assert_eq!(flow.tabs().selected_index(), Some(1));

        // Each contributor is a child flow whose root is the matching tab.
        let tab_ids: Vec<_> = flow.tabs().tabs().iter().map(|t| t.content.id()).collect();
        for (contributor, tab_id) in contributors.into_vec().iter().zip(tab_ids) {
            assert!(matches!(contributor.next, NextPresentable::Flow(_)));
            assert_eq!(contributor.next.id(), tab_id);
            assert!(contributor.stepper.initial_step().is_some());
        }
    }

    #[test]
    fn test_initial_tab_is_configurable() {
        let mut flow = MainFlow::new(test_context(TabKind::Settings));
        flow.navigate(&NavStep::Main(MainStep::TabBarRequired)).unwrap();
        assert_eq!(flow.tabs().selected().map(|t| t.item.title), Some("Settings".to_string()));
    }

    #[test]
    fn test_redelivery_rebuilds_the_same_shape() {
        let mut flow = MainFlow::new(test_context(TabKind::Chats));
        let first = flow.navigate(&NavStep::Main(MainStep::TabBarRequired)).unwrap();
        let second = flow.navigate(&NavStep::Main(MainStep::TabBarRequired)).unwrap();
        assert_eq!(first.len(), second.len());
        assert_eq!(flow.tabs().len(), 3);
    }

    #[test]
    fn test_foreign_steps_are_ignored() {
        let mut flow = MainFlow::new(test_context(TabKind::Chats));
        let contributors = flow.navigate(&NavStep::App(AppStep::Main)).unwrap();
        assert!(contributors.is_empty());
        assert!(flow.tabs().is_empty());
    }
}
