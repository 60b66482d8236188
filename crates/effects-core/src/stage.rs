//! The page as seen by the manager.
//!
//! [`Stage::lookup`] is the one place an element's presence is checked; every
//! other operation takes a handle that was already found. Operations on a
//! handle whose element has since left the document are silent no-ops.

use crate::card::{Rect, RippleGeometry};
use crate::element::VisualElement;
use std::collections::BTreeSet;

pub trait Stage {
    type Node: Clone;

    fn lookup(&self, id: &str) -> Option<Self::Node>;
    fn viewport_width(&self) -> f64;
    /// Create the DOM node for `element` and append it to `container`.
    fn attach_visual(
        &mut self,
        container: &Self::Node,
        element: &VisualElement,
    ) -> Option<Self::Node>;
    /// Remove `node` from its parent if it still has one.
    fn detach(&mut self, node: &Self::Node);
    fn add_class(&mut self, node: &Self::Node, class: &str);
    fn remove_class(&mut self, node: &Self::Node, class: &str);
    /// Smooth-scroll `node` to the vertical center of the viewport.
    fn scroll_into_center(&mut self, node: &Self::Node);
    /// Message lines inside a reveal section, in document order.
    fn message_lines(&self, section: &Self::Node) -> Vec<Self::Node>;
    /// Fade and slide one message line into place.
    fn reveal_line(&mut self, line: &Self::Node);
    fn card(&self, index: usize) -> Option<Self::Node>;
    fn bounding_rect(&self, node: &Self::Node) -> Rect;
    fn attach_ripple(&mut self, host: &Self::Node, ripple: &RippleGeometry) -> Option<Self::Node>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum MemoryKind {
    Container,
    Section,
    Line { revealed: bool },
    Card { rect: Rect },
    Visual(VisualElement),
    Ripple(RippleGeometry),
}

#[derive(Clone, Debug)]
pub struct MemoryNode {
    pub dom_id: Option<String>,
    pub kind: MemoryKind,
    pub parent: Option<usize>,
    pub classes: BTreeSet<String>,
    /// How many times `detach` was called on this node.
    pub detach_count: u32,
}

/// In-memory page used for headless runs and tests. Node handles are indices.
#[derive(Debug, Default)]
pub struct MemoryStage {
    nodes: Vec<MemoryNode>,
    cards: Vec<usize>,
    viewport_width: f64,
    scrolls: Vec<usize>,
}

impl MemoryStage {
    pub fn new(viewport_width: f64) -> Self {
        Self {
            viewport_width,
            ..Self::default()
        }
    }

    /// Page with the stock particle and heart containers and no reveal section.
    pub fn with_containers(viewport_width: f64) -> Self {
        let mut stage = Self::new(viewport_width);
        stage.add_container(crate::constants::AMBIENT_CONTAINER_ID);
        stage.add_container(crate::constants::HEART_CONTAINER_ID);
        stage
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
    }

    pub fn add_container(&mut self, dom_id: &str) -> usize {
        self.push(Some(dom_id), MemoryKind::Container, None)
    }

    pub fn add_section(&mut self, dom_id: &str, lines: usize) -> usize {
        let section = self.push(Some(dom_id), MemoryKind::Section, None);
        for _ in 0..lines {
            self.push(None, MemoryKind::Line { revealed: false }, Some(section));
        }
        section
    }

    pub fn add_card(&mut self, rect: Rect) -> usize {
        let card = self.push(None, MemoryKind::Card { rect }, None);
        self.cards.push(card);
        card
    }

    pub fn node(&self, node: usize) -> Option<&MemoryNode> {
        self.nodes.get(node)
    }

    pub fn children(&self, parent: usize) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent == Some(parent))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn has_class(&self, node: usize, class: &str) -> bool {
        self.nodes.get(node).is_some_and(|n| n.classes.contains(class))
    }

    pub fn is_revealed(&self, line: usize) -> bool {
        matches!(
            self.nodes.get(line).map(|n| &n.kind),
            Some(MemoryKind::Line { revealed: true })
        )
    }

    pub fn scrolls(&self) -> &[usize] {
        &self.scrolls
    }

    /// Nodes ever created, detached ones included.
    pub fn nodes_created(&self) -> usize {
        self.nodes.len()
    }

    pub fn max_detach_count(&self) -> u32 {
        self.nodes.iter().map(|n| n.detach_count).max().unwrap_or(0)
    }

    fn push(&mut self, dom_id: Option<&str>, kind: MemoryKind, parent: Option<usize>) -> usize {
        self.nodes.push(MemoryNode {
            dom_id: dom_id.map(str::to_string),
            kind,
            parent,
            classes: BTreeSet::new(),
            detach_count: 0,
        });
        self.nodes.len() - 1
    }
}

impl Stage for MemoryStage {
    type Node = usize;

    fn lookup(&self, id: &str) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| n.dom_id.as_deref() == Some(id))
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn attach_visual(&mut self, container: &usize, element: &VisualElement) -> Option<usize> {
        self.nodes.get(*container)?;
        Some(self.push(None, MemoryKind::Visual(element.clone()), Some(*container)))
    }

    fn detach(&mut self, node: &usize) {
        if let Some(n) = self.nodes.get_mut(*node) {
            n.parent = None;
            n.detach_count += 1;
        }
    }

    fn add_class(&mut self, node: &usize, class: &str) {
        if let Some(n) = self.nodes.get_mut(*node) {
            n.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, node: &usize, class: &str) {
        if let Some(n) = self.nodes.get_mut(*node) {
            n.classes.remove(class);
        }
    }

    fn scroll_into_center(&mut self, node: &usize) {
        self.scrolls.push(*node);
    }

    fn message_lines(&self, section: &usize) -> Vec<usize> {
        self.children(*section)
            .into_iter()
            .filter(|i| matches!(self.nodes[*i].kind, MemoryKind::Line { .. }))
            .collect()
    }

    fn reveal_line(&mut self, line: &usize) {
        if let Some(MemoryNode {
            kind: MemoryKind::Line { revealed },
            ..
        }) = self.nodes.get_mut(*line)
        {
            *revealed = true;
        }
    }

    fn card(&self, index: usize) -> Option<usize> {
        self.cards.get(index).copied()
    }

    fn bounding_rect(&self, node: &usize) -> Rect {
        match self.nodes.get(*node).map(|n| &n.kind) {
            Some(MemoryKind::Card { rect }) => *rect,
            _ => Rect::default(),
        }
    }

    fn attach_ripple(&mut self, host: &usize, ripple: &RippleGeometry) -> Option<usize> {
        self.nodes.get(*host)?;
        Some(self.push(None, MemoryKind::Ripple(*ripple), Some(*host)))
    }
}
