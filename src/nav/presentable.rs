//! # Presentables and Containers
//!
//! Everything the navigation layer can show is a `Presentable`:
//!
//! ```text
//! Presentable
//! ├── Screen(ScreenHandle)   // a view collaborator, leaf of the tree
//! ├── Stack(NavigationStack) // push/pop container, top child is visible
//! └── Tabs(TabBar)           // tab root, selected child is visible
//! ```
//!
//! Containers are shared handles over single-threaded cells. The container
//! that holds a child owns its visual lifetime; a flow only keeps a handle to
//! its own root. The coordinator decides liveness by walking this tree from
//! the root flow, so a child that is popped or replaced simply stops being
//! reachable.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::step::Navigation;

/// Process-unique identity of a presentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PresentableId(u64);

impl PresentableId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PresentableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "presentable#{}", self.0)
    }
}

// ============================================================================
// Screen
// ============================================================================

/// A leaf view plus the identity the navigation layer tracks it by.
pub struct ScreenHandle<N: Navigation> {
    id: PresentableId,
    view: Rc<N::View>,
}

impl<N: Navigation> ScreenHandle<N> {
    pub fn new(view: Rc<N::View>) -> Self {
        Self {
            id: PresentableId::next(),
            view,
        }
    }

    pub fn id(&self) -> PresentableId {
        self.id
    }

    pub fn view(&self) -> &Rc<N::View> {
        &self.view
    }
}

impl<N: Navigation> Clone for ScreenHandle<N> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            view: Rc::clone(&self.view),
        }
    }
}

// ============================================================================
// Navigation stack
// ============================================================================

/// Push/pop container. The last child is the visible one.
pub struct NavigationStack<N: Navigation> {
    id: PresentableId,
    children: Rc<RefCell<Vec<Presentable<N>>>>,
}

impl<N: Navigation> NavigationStack<N> {
    pub fn new() -> Self {
        Self {
            id: PresentableId::next(),
            children: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn id(&self) -> PresentableId {
        self.id
    }

    /// Replace the whole stack in one go.
    pub fn set(&self, children: Vec<Presentable<N>>) {
        *self.children.borrow_mut() = children;
    }

    pub fn push(&self, child: Presentable<N>) {
        self.children.borrow_mut().push(child);
    }

    /// Pop the top child. Never pops the root: with one child or none this
    /// returns `None` and leaves the stack alone.
    pub fn pop(&self) -> Option<Presentable<N>> {
        let mut children = self.children.borrow_mut();
        if children.len() <= 1 {
            return None;
        }
        children.pop()
    }

    pub fn top(&self) -> Option<Presentable<N>> {
        self.children.borrow().last().cloned()
    }

    pub fn children(&self) -> Vec<Presentable<N>> {
        self.children.borrow().clone()
    }

    pub fn ids(&self) -> Vec<PresentableId> {
        self.children.borrow().iter().map(Presentable::id).collect()
    }

    pub fn len(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.borrow().is_empty()
    }
}

impl<N: Navigation> Default for NavigationStack<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Navigation> Clone for NavigationStack<N> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            children: Rc::clone(&self.children),
        }
    }
}

// ============================================================================
// Tab bar
// ============================================================================

/// Display metadata for a tab. Owned by the tab root, not by the flow whose
/// root sits inside the tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabItem {
    pub title: String,
    pub icon: String,
}

impl TabItem {
    pub fn new(title: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: icon.into(),
        }
    }
}

pub struct Tab<N: Navigation> {
    pub item: TabItem,
    pub content: Presentable<N>,
}

impl<N: Navigation> Clone for Tab<N> {
    fn clone(&self) -> Self {
        Self {
            item: self.item.clone(),
            content: self.content.clone(),
        }
    }
}

struct TabBarState<N: Navigation> {
    tabs: Vec<Tab<N>>,
    selected: usize,
}

/// Tab root. The selected child is the visible one; every child stays live.
pub struct TabBar<N: Navigation> {
    id: PresentableId,
    state: Rc<RefCell<TabBarState<N>>>,
}

impl<N: Navigation> TabBar<N> {
    pub fn new() -> Self {
        Self {
            id: PresentableId::next(),
            state: Rc::new(RefCell::new(TabBarState {
                tabs: Vec::new(),
                selected: 0,
            })),
        }
    }

    pub fn id(&self) -> PresentableId {
        self.id
    }

    /// Replace all tabs at once and select `selected` (clamped to the last tab).
    pub fn set_tabs(&self, tabs: Vec<Tab<N>>, selected: usize) {
        let mut state = self.state.borrow_mut();
        state.selected = selected.min(tabs.len().saturating_sub(1));
        state.tabs = tabs;
    }

    /// Select tab `index`. Returns false and changes nothing when out of range.
    pub fn select(&self, index: usize) -> bool {
        let mut state = self.state.borrow_mut();
        if index >= state.tabs.len() {
            return false;
        }
        state.selected = index;
        true
    }

    pub fn selected_index(&self) -> Option<usize> {
        let state = self.state.borrow();
        (!state.tabs.is_empty()).then_some(state.selected)
    }

    pub fn selected(&self) -> Option<Tab<N>> {
        let state = self.state.borrow();
        state.tabs.get(state.selected).cloned()
    }

    pub fn tabs(&self) -> Vec<Tab<N>> {
        self.state.borrow().tabs.clone()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().tabs.is_empty()
    }
}

impl<N: Navigation> Default for TabBar<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Navigation> Clone for TabBar<N> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            state: Rc::clone(&self.state),
        }
    }
}

// ============================================================================
// Presentable
// ============================================================================

pub enum Presentable<N: Navigation> {
    Screen(ScreenHandle<N>),
    Stack(NavigationStack<N>),
    Tabs(TabBar<N>),
}

impl<N: Navigation> Presentable<N> {
    /// Wrap a view as a fresh screen presentable.
    pub fn screen(view: Rc<N::View>) -> Self {
        Presentable::Screen(ScreenHandle::new(view))
    }

    pub fn id(&self) -> PresentableId {
        match self {
            Presentable::Screen(screen) => screen.id(),
            Presentable::Stack(stack) => stack.id(),
            Presentable::Tabs(tabs) => tabs.id(),
        }
    }

    pub fn as_screen(&self) -> Option<&ScreenHandle<N>> {
        match self {
            Presentable::Screen(screen) => Some(screen),
            _ => None,
        }
    }

    /// Collect the ids of this node and everything it contains.
    ///
    /// Nodes already in `seen` are not descended into again, so a container
    /// accidentally nested in itself cannot loop forever.
    pub fn collect_reachable(&self, seen: &mut HashSet<PresentableId>) {
        if !seen.insert(self.id()) {
            return;
        }
        let children = match self {
            Presentable::Screen(_) => return,
            Presentable::Stack(stack) => stack.children(),
            Presentable::Tabs(tabs) => tabs.tabs().into_iter().map(|t| t.content).collect(),
        };
        for child in &children {
            child.collect_reachable(seen);
        }
    }

    /// The nodes a user actually sees, from this node down to the visible
    /// leaf: top of each stack, selected tab of each tab root.
    pub fn visible_chain(&self) -> Vec<Presentable<N>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(self.clone());
        while let Some(node) = current.take() {
            if !seen.insert(node.id()) {
                break;
            }
            current = match &node {
                Presentable::Screen(_) => None,
                Presentable::Stack(stack) => stack.top(),
                Presentable::Tabs(tabs) => tabs.selected().map(|t| t.content),
            };
            chain.push(node);
        }
        chain
    }

    /// The visible leaf screen, if the tree bottoms out in one.
    pub fn visible_screen(&self) -> Option<ScreenHandle<N>> {
        self.visible_chain()
            .last()
            .and_then(|node| node.as_screen().cloned())
    }

    /// Shallow copy of this container's own children, enough to undo a
    /// step that failed halfway through mutating it.
    pub(crate) fn snapshot(&self) -> ContainerSnapshot<N> {
        match self {
            Presentable::Screen(_) => ContainerSnapshot::Screen,
            Presentable::Stack(stack) => ContainerSnapshot::Stack(stack.clone(), stack.children()),
            Presentable::Tabs(tabs) => {
                let selected = tabs.state.borrow().selected;
                ContainerSnapshot::Tabs(tabs.clone(), tabs.tabs(), selected)
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Presentable::Screen(_) => "Screen",
            Presentable::Stack(_) => "Stack",
            Presentable::Tabs(_) => "Tabs",
        }
    }
}

/// Contents of one container at a point in time. See `Presentable::snapshot`.
pub(crate) enum ContainerSnapshot<N: Navigation> {
    Screen,
    Stack(NavigationStack<N>, Vec<Presentable<N>>),
    Tabs(TabBar<N>, Vec<Tab<N>>, usize),
}

impl<N: Navigation> ContainerSnapshot<N> {
    /// Put the container back the way it was when the snapshot was taken.
    pub(crate) fn restore(self) {
        match self {
            ContainerSnapshot::Screen => {}
            ContainerSnapshot::Stack(stack, children) => stack.set(children),
            ContainerSnapshot::Tabs(tabs, entries, selected) => tabs.set_tabs(entries, selected),
        }
    }
}

impl<N: Navigation> Clone for Presentable<N> {
    fn clone(&self) -> Self {
        match self {
            Presentable::Screen(screen) => Presentable::Screen(screen.clone()),
            Presentable::Stack(stack) => Presentable::Stack(stack.clone()),
            Presentable::Tabs(tabs) => Presentable::Tabs(tabs.clone()),
        }
    }
}

impl<N: Navigation> fmt::Debug for Presentable<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.id())
    }
}
