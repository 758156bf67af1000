//! Pointer events to interaction state.
//!
//! Handlers are declared once as a table keyed by layer id. Every pointer
//! event is resolved through that table into an [`EntityRef`] before any
//! state changes, and the manager answers with a list of
//! [`InteractionEffect`]s for the controller to apply to the engine.

use crate::engine::{Cursor, FeatureKey, PixelPoint, PointerEvent, PointerKind};
use crate::filter::ALL_FILTER;
use crate::layers::{self, LayerPlan};
use mrm_geo::Dataset;
use std::collections::HashMap;

/// Pixels between the cursor and the tooltip box.
pub const TOOLTIP_OFFSET: f64 = 10.0;

/// The entity behind an interactive layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Basin { id: String },
    Project { id: String, basin_id: String },
}

impl EntityRef {
    pub fn id(&self) -> &str {
        match self {
            EntityRef::Basin { id } | EntityRef::Project { id, .. } => id,
        }
    }

    /// The single geometry whose feature-state tracks this entity's hover.
    pub fn feature(&self) -> FeatureKey {
        let source = match self {
            EntityRef::Basin { id } => layers::basin_source_id(id),
            EntityRef::Project { id, .. } => layers::project_source_id(id),
        };
        FeatureKey {
            source,
            id: self.id().to_string(),
        }
    }
}

/// What one interactive layer does on enter, leave and click.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerBinding {
    pub entity: EntityRef,
    pub cta_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct HandlerTable {
    bindings: HashMap<String, LayerBinding>,
}

impl HandlerTable {
    pub fn build(plan: &LayerPlan, dataset: &Dataset) -> Self {
        let mut bindings = HashMap::new();
        for layer in plan.interactive_layers() {
            let Some(entity) = layer.target.clone() else {
                continue;
            };
            let cta_url = match &entity {
                EntityRef::Basin { id } => dataset.basin(id).map(|b| b.cta.url.clone()),
                EntityRef::Project { id, .. } => dataset.project(id).map(|p| p.cta_url()),
            };
            if let Some(cta_url) = cta_url {
                bindings.insert(layer.id.clone(), LayerBinding { entity, cta_url });
            }
        }
        Self { bindings }
    }

    pub fn lookup(&self, layer_id: &str) -> Option<&LayerBinding> {
        self.bindings.get(layer_id)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Session-scoped interaction state.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    /// At most one entity, basin or project, is hovered at a time.
    pub hovered: Option<EntityRef>,
    pub selected_filter: String,
    /// Last pointer position over the hovered entity.
    pub cursor: Option<PixelPoint>,
    /// A click has dispatched navigation; nothing else is processed.
    pub navigated: bool,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            hovered: None,
            selected_filter: ALL_FILTER.to_string(),
            cursor: None,
            navigated: false,
        }
    }
}

impl InteractionState {
    pub fn hovered_basin(&self) -> Option<&str> {
        match &self.hovered {
            Some(EntityRef::Basin { id }) => Some(id),
            _ => None,
        }
    }

    pub fn hovered_project(&self) -> Option<&str> {
        match &self.hovered {
            Some(EntityRef::Project { id, .. }) => Some(id),
            _ => None,
        }
    }
}

/// Engine-side consequence of an interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEffect {
    SetHover { feature: FeatureKey, hover: bool },
    SetCursor(Cursor),
    /// Full-page navigation.
    Navigate(String),
}

#[derive(Debug, Clone, Default)]
pub struct InteractionManager {
    table: HandlerTable,
    state: InteractionState,
}

impl InteractionManager {
    pub fn new(table: HandlerTable) -> Self {
        Self {
            table,
            state: InteractionState::default(),
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn table(&self) -> &HandlerTable {
        &self.table
    }

    pub fn select_filter(&mut self, token: &str) {
        self.state.selected_filter = token.to_string();
    }

    pub fn handle(&mut self, event: &PointerEvent) -> Vec<InteractionEffect> {
        if self.state.navigated {
            return Vec::new();
        }
        let Some(binding) = self.table.lookup(&event.layer) else {
            return Vec::new();
        };
        let (entity, cta_url) = (binding.entity.clone(), binding.cta_url.clone());

        match event.kind {
            PointerKind::Enter => self.enter(entity, event.point()),
            PointerKind::Move => {
                if self.state.hovered.as_ref() == Some(&entity) {
                    self.state.cursor = Some(event.point());
                    Vec::new()
                } else {
                    // A move over an entity we never saw enter.
                    self.enter(entity, event.point())
                }
            }
            PointerKind::Leave => self.leave(entity),
            PointerKind::Click => {
                log::info!("[MRM] navigating to {}", cta_url);
                self.state.navigated = true;
                vec![InteractionEffect::Navigate(cta_url)]
            }
        }
    }

    fn enter(&mut self, entity: EntityRef, at: PixelPoint) -> Vec<InteractionEffect> {
        let mut effects = Vec::with_capacity(3);
        if let Some(previous) = self.state.hovered.take() {
            if previous != entity {
                effects.push(InteractionEffect::SetHover {
                    feature: previous.feature(),
                    hover: false,
                });
            }
        }
        effects.push(InteractionEffect::SetHover {
            feature: entity.feature(),
            hover: true,
        });
        effects.push(InteractionEffect::SetCursor(Cursor::Pointer));
        self.state.hovered = Some(entity);
        self.state.cursor = Some(at);
        effects
    }

    fn leave(&mut self, entity: EntityRef) -> Vec<InteractionEffect> {
        let mut effects = vec![InteractionEffect::SetHover {
            feature: entity.feature(),
            hover: false,
        }];
        // A stale leave only clears its own feature-state.
        if self.state.hovered.as_ref() == Some(&entity) {
            self.state.hovered = None;
            self.state.cursor = None;
            effects.push(InteractionEffect::SetCursor(Cursor::Default));
        }
        effects
    }

    /// Explicit close of the bottom sheet.
    pub fn dismiss(&mut self) -> Vec<InteractionEffect> {
        match self.state.hovered.take() {
            Some(entity) => {
                self.state.cursor = None;
                vec![
                    InteractionEffect::SetHover {
                        feature: entity.feature(),
                        hover: false,
                    },
                    InteractionEffect::SetCursor(Cursor::Default),
                ]
            }
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipSide {
    Right,
    Left,
}

/// Top-left corner of the tooltip box, relative to the map container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipPlacement {
    pub left: f64,
    pub top: f64,
    pub side: TooltipSide,
}

/// Place the tooltip beside the cursor, flipping to the left once the
/// cursor is past the container's horizontal midpoint.
pub fn place_tooltip(cursor: PixelPoint, container_width: f64, tooltip_width: f64) -> TooltipPlacement {
    let top = cursor.y + TOOLTIP_OFFSET;
    if cursor.x > container_width / 2.0 {
        TooltipPlacement {
            left: (cursor.x - TOOLTIP_OFFSET - tooltip_width).max(0.0),
            top,
            side: TooltipSide::Left,
        }
    } else {
        TooltipPlacement {
            left: cursor.x + TOOLTIP_OFFSET,
            top,
            side: TooltipSide::Right,
        }
    }
}

/// How hover details are shown. Chosen once at mount; the hover state
/// machine is the same for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    Tooltip,
    BottomSheet,
}

impl Presentation {
    pub fn detect(container_width: f64, pointer_is_coarse: bool, breakpoint: f64) -> Self {
        if pointer_is_coarse || container_width < breakpoint {
            Presentation::BottomSheet
        } else {
            Presentation::Tooltip
        }
    }
}
