// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay subscriptions and the open-overlay stack.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect};

use crate::error::OverlayError;
use crate::node::{FrameChanges, NodeId, NodeStore};
use crate::trace::{OverlayInvalidatedEvent, Tracer};

/// Handle to an overlay subscription.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverlayId(pub(crate) u32);

impl fmt::Debug for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OverlayId({})", self.0)
    }
}

/// Router configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayConfig {
    /// Pixels added on every side of an open overlay's content rectangle
    /// before a click counts as outside.
    pub click_margin: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { click_margin: 20.0 }
    }
}

/// One overlay to draw after its anchor's subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Injection {
    /// The subscription.
    pub overlay: OverlayId,
    /// The node after whose subtree the content is drawn.
    pub anchor: NodeId,
    /// The overlay content root.
    pub content: NodeId,
}

#[derive(Clone, Debug)]
struct Subscription {
    id: OverlayId,
    owner: NodeId,
    content: NodeId,
    /// `owner`, its parent, ..., the anchor.
    chain: Vec<NodeId>,
}

impl Subscription {
    fn anchor(&self) -> NodeId {
        // The chain always holds at least the owner.
        self.chain[self.chain.len() - 1]
    }

    /// First chain level that no longer parents the level below it.
    fn broken_link(&self, store: &NodeStore) -> Option<Option<NodeId>> {
        if !store.is_alive(self.owner) || !store.is_alive(self.content) {
            return Some(None);
        }
        for pair in self.chain.windows(2) {
            let (below, above) = (pair[0], pair[1]);
            if !store.is_alive(above) || !store.is_alive(below) {
                return Some(Some(above));
            }
            if store.parent(below) != Some(above) {
                return Some(Some(above));
            }
        }
        None
    }
}

/// Routes overlay content (dropdown lists, context menus) so it draws after
/// a chosen ancestor of its owner, and tracks which overlays are open.
///
/// Subscribing walks the owner's ancestors and picks the highest one that
/// draws something itself and is not a root; without such an ancestor the
/// direct parent is used. The walked chain is re-validated every time the
/// overlay would be injected; if any level no longer parents the next, the
/// subscription drops itself.
#[derive(Debug, Default)]
pub struct OverlayRouter {
    config: OverlayConfig,
    subscriptions: Vec<Subscription>,
    /// Open overlays, outermost first. Each entry is nested in the one below.
    open: Vec<OverlayId>,
    next_id: u32,
}

impl OverlayRouter {
    /// Creates an empty router.
    #[must_use]
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> OverlayConfig {
        self.config
    }

    /// Subscribes `content` as the overlay of `owner`.
    ///
    /// # Errors
    ///
    /// [`OverlayError::AlreadySubscribed`] if `owner` already has a live
    /// subscription, [`OverlayError::ContentIsAncestor`] if `content` is
    /// `owner` or one of its ancestors.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn subscribe(
        &mut self,
        store: &NodeStore,
        owner: NodeId,
        content: NodeId,
    ) -> Result<OverlayId, OverlayError> {
        if self.subscriptions.iter().any(|s| s.owner == owner) {
            return Err(OverlayError::AlreadySubscribed(owner));
        }
        if content == owner || store.is_ancestor_of(content, owner) {
            return Err(OverlayError::ContentIsAncestor { owner, content });
        }
        let id = OverlayId(self.next_id);
        self.next_id += 1;
        let chain = walk(store, owner);
        log::debug!(
            "{id:?}: {owner:?} injects {content:?} after {:?}",
            chain[chain.len() - 1]
        );
        self.subscriptions.push(Subscription {
            id,
            owner,
            content,
            chain,
        });
        Ok(id)
    }

    /// Removes a subscription, closing it if open.
    ///
    /// # Errors
    ///
    /// [`OverlayError::UnknownOverlay`] if the subscription does not exist.
    pub fn unsubscribe(&mut self, id: OverlayId) -> Result<(), OverlayError> {
        let pos = self.position(id)?;
        self.subscriptions.remove(pos);
        self.close(id);
        Ok(())
    }

    /// Returns the subscription of `owner`, if any.
    #[must_use]
    pub fn subscription_of(&self, owner: NodeId) -> Option<OverlayId> {
        self.subscriptions
            .iter()
            .find(|s| s.owner == owner)
            .map(|s| s.id)
    }

    /// Returns whether the subscription exists.
    #[must_use]
    pub fn contains(&self, id: OverlayId) -> bool {
        self.position(id).is_ok()
    }

    /// Returns the owner of a subscription.
    #[must_use]
    pub fn owner(&self, id: OverlayId) -> Option<NodeId> {
        self.get(id).map(|s| s.owner)
    }

    /// Returns the content root of a subscription.
    #[must_use]
    pub fn content(&self, id: OverlayId) -> Option<NodeId> {
        self.get(id).map(|s| s.content)
    }

    /// Returns the node after whose subtree the content is drawn.
    #[must_use]
    pub fn anchor(&self, id: OverlayId) -> Option<NodeId> {
        self.get(id).map(Subscription::anchor)
    }

    /// Returns the recorded chain from the owner up to the anchor.
    #[must_use]
    pub fn chain(&self, id: OverlayId) -> Option<&[NodeId]> {
        self.get(id).map(|s| s.chain.as_slice())
    }

    /// Returns whether `node` is the content root of any subscription.
    #[must_use]
    pub fn is_content(&self, node: NodeId) -> bool {
        self.subscriptions.iter().any(|s| s.content == node)
    }

    /// Opens an overlay.
    ///
    /// If the owner lies inside the content of an already open overlay, the
    /// new one nests on top of it and overlays opened above that one are
    /// closed. Otherwise every open overlay is closed first.
    ///
    /// # Errors
    ///
    /// [`OverlayError::UnknownOverlay`] if the subscription does not exist.
    pub fn open(&mut self, store: &NodeStore, id: OverlayId) -> Result<(), OverlayError> {
        let owner = self.get(id).ok_or(OverlayError::UnknownOverlay(id))?.owner;
        if self.is_open(id) {
            return Ok(());
        }
        let keep = self
            .open
            .iter()
            .rposition(|&o| {
                self.content(o).is_some_and(|content| {
                    content == owner
                        || (store.is_alive(owner)
                            && store.is_alive(content)
                            && store.is_ancestor_of(content, owner))
                })
            })
            .map_or(0, |pos| pos + 1);
        self.open.truncate(keep);
        self.open.push(id);
        Ok(())
    }

    /// Closes an overlay and every overlay nested above it. No-op if closed.
    pub fn close(&mut self, id: OverlayId) {
        if let Some(pos) = self.open.iter().position(|&o| o == id) {
            self.open.truncate(pos);
        }
    }

    /// Opens a closed overlay or closes an open one.
    ///
    /// # Errors
    ///
    /// [`OverlayError::UnknownOverlay`] if the subscription does not exist.
    pub fn toggle(&mut self, store: &NodeStore, id: OverlayId) -> Result<(), OverlayError> {
        if self.is_open(id) {
            self.close(id);
            Ok(())
        } else {
            self.open(store, id)
        }
    }

    /// Closes the innermost open overlay.
    pub fn close_top(&mut self) -> Option<OverlayId> {
        self.open.pop()
    }

    /// Closes every open overlay.
    pub fn close_all(&mut self) {
        self.open.clear();
    }

    /// Returns whether an overlay is open.
    #[must_use]
    pub fn is_open(&self, id: OverlayId) -> bool {
        self.open.contains(&id)
    }

    /// Open overlays, outermost first.
    #[must_use]
    pub fn open_chain(&self) -> &[OverlayId] {
        &self.open
    }

    /// Closes every open overlay whose hit region does not contain `point`.
    /// Returns the closed overlays, innermost first.
    ///
    /// An overlay's region is its content rectangle inflated by
    /// [`OverlayConfig::click_margin`], plus its owner's rectangle, plus the
    /// regions of every overlay nested above it. Reads cached geometry.
    pub fn close_on_click_outside(&mut self, store: &NodeStore, point: Point) -> Vec<OverlayId> {
        let margin = self.config.click_margin;
        let mut region: Vec<Rect> = Vec::new();
        let mut keep = Vec::with_capacity(self.open.len());
        let mut closed = Vec::new();
        for &id in self.open.iter().rev() {
            if let Some(sub) = self.get(id) {
                if store.is_alive(sub.content) {
                    region.push(store.cached_rect(sub.content).inflate(margin, margin));
                }
                if store.is_alive(sub.owner) {
                    region.push(store.cached_rect(sub.owner));
                }
            }
            if region.iter().any(|r| r.contains(point)) {
                keep.push(id);
            } else {
                closed.push(id);
            }
        }
        keep.reverse();
        self.open = keep;
        closed
    }

    /// Applies one evaluate's worth of notifications: drops subscriptions
    /// whose owner or content was destroyed, and re-walks the chain of every
    /// owner whose own parent changed.
    pub fn sync(&mut self, store: &NodeStore, changes: &FrameChanges) {
        let mut dropped = Vec::new();
        for sub in &mut self.subscriptions {
            if !store.is_alive(sub.owner) || !store.is_alive(sub.content) {
                dropped.push(sub.id);
                continue;
            }
            if changes.reparented.binary_search(&sub.owner.index()).is_ok() {
                sub.chain = walk(store, sub.owner);
                log::debug!(
                    "{:?}: owner moved, now injects after {:?}",
                    sub.id,
                    sub.anchor()
                );
            }
        }
        for id in dropped {
            log::debug!("{id:?}: owner or content destroyed");
            let _ = self.unsubscribe(id);
        }
    }

    /// Validates every subscription and returns the injections for open
    /// overlays, outermost first.
    ///
    /// Subscriptions whose recorded chain is broken unsubscribe themselves;
    /// this is logged and traced but not an error.
    pub fn injections(&mut self, store: &NodeStore, tracer: &mut Tracer<'_>) -> Vec<Injection> {
        let broken: Vec<(OverlayId, NodeId, Option<NodeId>)> = self
            .subscriptions
            .iter()
            .filter_map(|s| s.broken_link(store).map(|at| (s.id, s.owner, at)))
            .collect();
        for (overlay, owner, broken_at) in broken {
            log::warn!("{overlay:?}: parent chain of {owner:?} broken at {broken_at:?}; unsubscribing");
            tracer.overlay_invalidated(&OverlayInvalidatedEvent {
                overlay,
                owner,
                broken_at,
            });
            let _ = self.unsubscribe(overlay);
        }
        self.open
            .iter()
            .filter_map(|&id| {
                self.get(id).map(|s| Injection {
                    overlay: id,
                    anchor: s.anchor(),
                    content: s.content,
                })
            })
            .collect()
    }

    fn get(&self, id: OverlayId) -> Option<&Subscription> {
        self.subscriptions.iter().find(|s| s.id == id)
    }

    fn position(&self, id: OverlayId) -> Result<usize, OverlayError> {
        self.subscriptions
            .iter()
            .position(|s| s.id == id)
            .ok_or(OverlayError::UnknownOverlay(id))
    }
}

/// Chain from `owner` up to its injection anchor.
fn walk(store: &NodeStore, owner: NodeId) -> Vec<NodeId> {
    let mut chain = alloc::vec![owner];
    let mut anchor_len = None;
    for a in store.ancestors(owner) {
        chain.push(a);
        if store.parent(a).is_some() && store.flags(a).draws_content {
            anchor_len = Some(chain.len());
        }
    }
    chain.truncate(anchor_len.unwrap_or(2));
    chain
}
