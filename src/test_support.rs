//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::nav::{
    Flow, FlowContributor, FlowContributors, Navigation, NavigationError, NavigationStack,
    Presentable, Stepper, Tab, TabBar, TabItem,
};
use crate::screens::ScreenView;

/// Minimal navigation vocabulary for exercising the core without any real
/// screens. Views are just their names.
pub struct Mock;

impl Navigation for Mock {
    type Step = MockStep;
    type View = str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockStep {
    /// Replace the stack with one named screen.
    Show(&'static str),
    /// Push a named screen.
    Push(&'static str),
    Back,
    /// Replace the stack with a tab root of N child mock flows.
    Fanout(usize),
    Fail,
    Panic,
    /// Push a named screen, then panic before returning.
    PushThenPanic(&'static str),
    /// Push the root of a nested flow, always handing it the same stepper.
    Nest,
    /// Something no mock flow understands.
    Other,
}

pub fn mock_screen(name: &str) -> Presentable<Mock> {
    Presentable::screen(Rc::from(name))
}

/// Stack-backed flow that records every stepper it hands out, so tests can
/// emit "from" the screens it created.
pub struct MockFlow {
    name: &'static str,
    stack: NavigationStack<Mock>,
    steppers: Rc<RefCell<Vec<Stepper<MockStep>>>>,
    nest: Stepper<MockStep>,
}

impl MockFlow {
    pub fn new(name: &'static str) -> Self {
        Self::sharing(name, Rc::new(RefCell::new(Vec::new())))
    }

    fn sharing(name: &'static str, steppers: Rc<RefCell<Vec<Stepper<MockStep>>>>) -> Self {
        Self {
            name,
            stack: NavigationStack::new(),
            steppers,
            nest: Stepper::one(MockStep::Show("nested")),
        }
    }

    pub fn stack(&self) -> NavigationStack<Mock> {
        self.stack.clone()
    }

    pub fn steppers(&self) -> Rc<RefCell<Vec<Stepper<MockStep>>>> {
        Rc::clone(&self.steppers)
    }

    /// The stepper every `Nest` step hands to its nested flow.
    pub fn nest_stepper(&self) -> Stepper<MockStep> {
        self.nest.clone()
    }

    fn screen_contributor(&self, name: &str) -> (Presentable<Mock>, FlowContributors<Mock>) {
        let screen = mock_screen(name);
        let stepper = Stepper::new();
        self.steppers.borrow_mut().push(stepper.clone());
        (
            screen.clone(),
            FlowContributors::One(FlowContributor::contribute(screen, stepper)),
        )
    }
}

impl Flow<Mock> for MockFlow {
    fn name(&self) -> &'static str {
        self.name
    }

    fn root(&self) -> Presentable<Mock> {
        Presentable::Stack(self.stack.clone())
    }

    fn navigate(&mut self, step: &MockStep) -> Result<FlowContributors<Mock>, NavigationError> {
        match step {
            MockStep::Show(name) => {
                let (screen, contributors) = self.screen_contributor(name);
                self.stack.set(vec![screen]);
                Ok(contributors)
            }
            MockStep::Push(name) => {
                let (screen, contributors) = self.screen_contributor(name);
                self.stack.push(screen);
                Ok(contributors)
            }
            MockStep::Back => {
                self.stack.pop();
                Ok(FlowContributors::None)
            }
            MockStep::Fanout(count) => {
                let children: Vec<MockFlow> = (0..*count)
                    .map(|_| MockFlow::sharing("mock-child", Rc::clone(&self.steppers)))
                    .collect();
                let tabs = TabBar::new();
                tabs.set_tabs(
                    children
                        .iter()
                        .enumerate()
                        .map(|(i, child)| Tab {
                            item: TabItem::new(format!("Tab {i}"), "*"),
                            content: child.root(),
                        })
                        .collect(),
                    0,
                );
                self.stack.set(vec![Presentable::Tabs(tabs)]);
                Ok(FlowContributors::Multiple(
                    children
                        .into_iter()
                        .map(|child| {
                            FlowContributor::child_flow(child, Stepper::one(MockStep::Show("child")))
                        })
                        .collect(),
                ))
            }
            MockStep::Fail => Err(NavigationError::build(self.name, "mock asked to fail")),
            MockStep::Panic => panic!("mock flow exploded"),
            MockStep::PushThenPanic(name) => {
                self.stack.push(mock_screen(name));
                panic!("mock flow exploded after pushing {name}")
            }
            MockStep::Nest => {
                let child = MockFlow::sharing("mock-nested", Rc::clone(&self.steppers));
                self.stack.push(child.root());
                Ok(FlowContributors::One(FlowContributor::child_flow(
                    child,
                    self.nest.clone(),
                )))
            }
            MockStep::Other => Ok(FlowContributors::None),
        }
    }
}

/// Unique scratch path under the system temp dir.
pub fn scratch_path(file_name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("zyna-test-{}", uuid::Uuid::new_v4()))
        .join(file_name)
}

/// Title of the screen a presentation tree currently shows.
pub fn visible_title(root: &Presentable<crate::flows::Zyna>) -> Option<String> {
    root.visible_screen().map(|screen| screen.view().title())
}

/// Downcast-free check used by flow tests: is the top of `stack` a screen
/// with this title?
pub fn top_title(stack: &NavigationStack<crate::flows::Zyna>) -> Option<String> {
    stack
        .top()
        .and_then(|top| top.as_screen().map(|s| ScreenView::title(s.view().as_ref())))
}

/// App context backed by a fresh, empty session file.
pub fn test_context(initial_tab: crate::TabKind) -> crate::flows::AppContext {
    crate::flows::AppContext::new(
        crate::core::session::SessionStore::new(scratch_path("session.json")),
        initial_tab,
        "Guest",
    )
}
