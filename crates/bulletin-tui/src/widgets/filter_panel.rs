//! Filter panel widget — tri-state multi-select tree of facet values.
//!
//! The tree has one group node per facet dimension (Level, College,
//! Subject) with the vocabulary values as leaves. Selecting leaves builds
//! the filter selections of the search; an unselected dimension imposes no
//! restriction.
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move the cursor up and down the visible list.
//! - `→`/`l` expands the focused group; `←`/`h` collapses it.
//! - `Space` or `Enter` toggles the selection state of the focused node.

use crate::event::{AppEvent, Direction};
use bulletin_catalog::Vocabulary;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};
use tracing;

// ---------------------------------------------------------------------------
// Selection state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeSelection {
    /// Every value under this node participates in the filter.
    Selected,
    /// No value under this node participates.
    Unselected,
    /// Some (but not all) values under this node participate.
    Partial,
}

// ---------------------------------------------------------------------------
// Tree node
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Stable identifier (used for mutations).
    pub id: String,
    /// Human-readable display label.
    pub label: String,
    pub expanded: bool,
    pub selection: NodeSelection,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            expanded: true,
            selection: NodeSelection::Unselected,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }
}

// ---------------------------------------------------------------------------
// Panel state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FilterPanelState {
    pub nodes: Vec<TreeNode>,
    /// Index into the currently-visible (flattened) list.
    pub cursor: usize,
}

impl FilterPanelState {
    /// Build the three facet groups from the session vocabulary. The
    /// Level group starts expanded (it is short); the larger College and
    /// Subject groups start collapsed.
    pub fn from_vocabulary(vocab: &Vocabulary) -> Self {
        let group = |id: &str, label: &str, values: &[String], expanded: bool| {
            let children = values
                .iter()
                .map(|v| TreeNode::new(format!("{id}/{v}"), v.clone()))
                .collect();
            let mut node = TreeNode::new(id, label).with_children(children);
            node.expanded = expanded;
            node
        };
        Self {
            nodes: vec![
                group("level", "Level", &vocab.levels, true),
                group("college", "College", &vocab.colleges, false),
                group("subject", "Subject", &vocab.subjects, false),
            ],
            cursor: 0,
        }
    }

    /// Labels of the selected leaves under the group with `group_id` —
    /// the filter selection for that dimension.
    pub fn selected_values(&self, group_id: &str) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|n| n.id == group_id)
            .flat_map(|n| n.children.iter())
            .filter(|leaf| leaf.selection == NodeSelection::Selected)
            .map(|leaf| leaf.label.clone())
            .collect()
    }

    /// Return the id of the node at the cursor, if any.
    fn cursor_id(&self) -> Option<String> {
        self.visible()
            .into_iter()
            .nth(self.cursor)
            .map(|(_, n)| n.id.clone())
    }

    /// Flatten the tree into `(depth, &node)` pairs, respecting expanded state.
    pub fn visible(&self) -> Vec<(usize, &TreeNode)> {
        flatten(&self.nodes, 0)
    }

    /// Handle an [`AppEvent`]. Returns `true` when the event changed a
    /// selection, meaning the search must be re-run.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "filters: cursor up");
                false
            }
            AppEvent::Nav(Direction::Down) => {
                let max = self.visible().len().saturating_sub(1);
                if self.cursor < max {
                    self.cursor += 1;
                }
                tracing::debug!(cursor = self.cursor, "filters: cursor down");
                false
            }
            AppEvent::Nav(Direction::Right) => {
                if let Some(id) = self.cursor_id() {
                    tracing::debug!(node = %id, "filters: expand");
                    set_expanded(&mut self.nodes, &id, true);
                }
                false
            }
            AppEvent::Nav(Direction::Left) => {
                if let Some(id) = self.cursor_id() {
                    tracing::debug!(node = %id, "filters: collapse");
                    set_expanded(&mut self.nodes, &id, false);
                    self.clamp_cursor();
                }
                false
            }
            AppEvent::Enter => {
                if let Some(id) = self.cursor_id() {
                    if is_leaf(&self.nodes, &id) {
                        tracing::debug!(node = %id, "filters: toggle selection (leaf enter)");
                        toggle_selection(&mut self.nodes, &id);
                        true
                    } else {
                        tracing::debug!(node = %id, "filters: toggle expand (group enter)");
                        toggle_expanded(&mut self.nodes, &id);
                        self.clamp_cursor();
                        false
                    }
                } else {
                    false
                }
            }
            AppEvent::Char(' ') => {
                if let Some(id) = self.cursor_id() {
                    tracing::debug!(node = %id, "filters: toggle selection (space)");
                    toggle_selection(&mut self.nodes, &id);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn clamp_cursor(&mut self) {
        let max = self.visible().len().saturating_sub(1);
        if self.cursor > max {
            self.cursor = max;
        }
    }
}

// ---------------------------------------------------------------------------
// Recursive tree helpers
// ---------------------------------------------------------------------------

fn flatten(nodes: &[TreeNode], depth: usize) -> Vec<(usize, &TreeNode)> {
    let mut out = Vec::new();
    for node in nodes {
        out.push((depth, node));
        if node.expanded {
            out.extend(flatten(&node.children, depth + 1));
        }
    }
    out
}

/// Set the `expanded` flag on the node with `id`. Returns `true` if found.
fn set_expanded(nodes: &mut [TreeNode], id: &str, expanded: bool) -> bool {
    for node in nodes.iter_mut() {
        if node.id == id {
            node.expanded = expanded;
            return true;
        }
        if set_expanded(&mut node.children, id, expanded) {
            return true;
        }
    }
    false
}

/// Flip the `expanded` flag on the node with `id`. Returns `true` if found.
fn toggle_expanded(nodes: &mut [TreeNode], id: &str) -> bool {
    for node in nodes.iter_mut() {
        if node.id == id {
            node.expanded = !node.expanded;
            return true;
        }
        if toggle_expanded(&mut node.children, id) {
            return true;
        }
    }
    false
}

/// Returns `Some(true)` if the node with `id` is a leaf, `Some(false)` if it
/// has children, or `None` if the id is not found in the subtree.
fn find_is_leaf(nodes: &[TreeNode], id: &str) -> Option<bool> {
    for node in nodes {
        if node.id == id {
            return Some(node.children.is_empty());
        }
        if let Some(result) = find_is_leaf(&node.children, id) {
            return Some(result);
        }
    }
    None
}

fn is_leaf(nodes: &[TreeNode], id: &str) -> bool {
    find_is_leaf(nodes, id).unwrap_or(true)
}

/// Toggle the selection state of the node with `id`.
///
/// When the toggled node is found, its new state is pushed down to every
/// descendant via [`set_all_selection`]. On the way back up the call stack,
/// each ancestor recomputes its own state from its children via
/// [`compute_selection_from_children`].
fn toggle_selection(nodes: &mut [TreeNode], id: &str) -> bool {
    for node in nodes.iter_mut() {
        if node.id == id {
            let new_state = match node.selection {
                NodeSelection::Selected | NodeSelection::Partial => NodeSelection::Unselected,
                NodeSelection::Unselected => NodeSelection::Selected,
            };
            node.selection = new_state;
            // Push the new state down to every descendant
            set_all_selection(&mut node.children, new_state);
            return true;
        }
        if toggle_selection(&mut node.children, id) {
            // Recompute this node's state from its (now-updated) children
            node.selection = compute_selection_from_children(&node.children);
            return true;
        }
    }
    false
}

/// Recursively set every node in the subtree to `state`.
fn set_all_selection(nodes: &mut [TreeNode], state: NodeSelection) {
    for node in nodes.iter_mut() {
        node.selection = state;
        set_all_selection(&mut node.children, state);
    }
}

/// Derive a group's selection state from the states of its direct children.
///
/// - All `Selected`   → `Selected`
/// - All `Unselected` → `Unselected`
/// - Any mix (or any child is `Partial`) → `Partial`
fn compute_selection_from_children(children: &[TreeNode]) -> NodeSelection {
    if children.is_empty() {
        return NodeSelection::Unselected;
    }
    let all_sel = children
        .iter()
        .all(|c| c.selection == NodeSelection::Selected);
    let all_unsel = children
        .iter()
        .all(|c| c.selection == NodeSelection::Unselected);
    if all_sel {
        NodeSelection::Selected
    } else if all_unsel {
        NodeSelection::Unselected
    } else {
        NodeSelection::Partial
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct FilterPanel<'a> {
    state: &'a FilterPanelState,
    focused: bool,
    theme: &'a crate::theme::Theme,
}

impl<'a> FilterPanel<'a> {
    pub fn new(
        state: &'a FilterPanelState,
        focused: bool,
        theme: &'a crate::theme::Theme,
    ) -> Self {
        Self {
            state,
            focused,
            theme,
        }
    }
}

impl Widget for FilterPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title("Filters")
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let visible = self.state.visible();

        let items: Vec<ListItem> = visible
            .iter()
            .map(|(depth, node)| {
                let indent = "  ".repeat(*depth);
                let expand = if node.children.is_empty() {
                    "  "
                } else if node.expanded {
                    "▼ "
                } else {
                    "▶ "
                };
                let sel = match node.selection {
                    NodeSelection::Selected => " ✓",
                    NodeSelection::Unselected => " ○",
                    NodeSelection::Partial => " ◐",
                };
                ListItem::new(Line::from(format!(
                    "{}{}{}{}",
                    indent, expand, node.label, sel
                )))
            })
            .collect();

        let list =
            List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut list_state = ListState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
