//! Data-driven layer plan: one source and a fixed set of layers per entity.
//!
//! Every source carries a single feature whose `id` property is promoted to
//! the feature id, so a feature-state update addresses exactly one geometry.

use crate::engine::FeatureKey;
use crate::interaction::EntityRef;
use mrm_geo::{Basin, Dataset, ProjectSite};
use serde::Serialize;
use serde_json::{json, Value};

const LABEL_COLOR: &str = "#1F2937";
const PROJECT_COLOR: &str = "#1E3A5F";

// Ids are `<kind>:<entity id>`. Entity ids are slugs and never contain `:`,
// so ids of different kinds or entities cannot coincide.

pub fn basin_source_id(basin_id: &str) -> String {
    format!("basin:{}", basin_id)
}

pub fn basin_label_source_id(basin_id: &str) -> String {
    format!("basin-label:{}", basin_id)
}

pub fn project_source_id(project_id: &str) -> String {
    format!("project:{}", project_id)
}

pub fn basin_fill_layer_id(basin_id: &str) -> String {
    format!("basin-fill:{}", basin_id)
}

pub fn basin_outline_layer_id(basin_id: &str) -> String {
    format!("basin-outline:{}", basin_id)
}

pub fn basin_label_layer_id(basin_id: &str) -> String {
    format!("basin-label:{}", basin_id)
}

pub fn project_layer_id(project_id: &str) -> String {
    format!("project-point:{}", project_id)
}

/// Paint value switched on the `hover` feature-state.
fn when_hovered(hovered: Value, idle: Value) -> Value {
    json!(["case", ["boolean", ["feature-state", "hover"], false], hovered, idle])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Fill,
    Outline,
    Label,
    Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSpec {
    pub id: String,
    /// Engine source object (`{"type": "geojson", ...}`).
    pub spec: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: String,
    pub source: String,
    pub kind: LayerKind,
    /// Engine layer object, including `id` and `source`.
    pub spec: Value,
    /// Entity this layer reports pointer events for. Outline and label
    /// layers are decorative and not watched.
    #[serde(skip)]
    pub target: Option<EntityRef>,
}

impl LayerSpec {
    /// Feature addressed by hover feature-state for this layer's entity.
    pub fn feature(&self) -> Option<FeatureKey> {
        self.target.as_ref().map(|entity| FeatureKey {
            source: self.source.clone(),
            id: entity.id().to_string(),
        })
    }
}

/// Sources and layers for a whole dataset, in registration order: basin
/// fills, outlines, labels, then project points on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayerPlan {
    pub sources: Vec<SourceSpec>,
    pub layers: Vec<LayerSpec>,
}

impl LayerPlan {
    pub fn build(dataset: &Dataset) -> Self {
        let mut plan = LayerPlan::default();
        let mut outlines = Vec::new();
        let mut labels = Vec::new();

        for basin in dataset.basins() {
            plan.sources.push(basin_source(basin));
            plan.sources.push(basin_label_source(basin));
            plan.layers.push(basin_fill_layer(basin));
            outlines.push(basin_outline_layer(basin));
            labels.push(basin_label_layer(basin));
        }
        plan.layers.append(&mut outlines);
        plan.layers.append(&mut labels);

        for project in dataset.projects() {
            plan.sources.push(project_source(project));
            plan.layers.push(project_layer(project));
        }
        plan
    }

    pub fn layers_of(&self, kind: LayerKind) -> impl Iterator<Item = &LayerSpec> {
        self.layers.iter().filter(move |l| l.kind == kind)
    }

    /// Layers that receive pointer handlers.
    pub fn interactive_layers(&self) -> impl Iterator<Item = &LayerSpec> {
        self.layers.iter().filter(|l| l.target.is_some())
    }

    pub fn layer(&self, id: &str) -> Option<&LayerSpec> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Mapbox style fragment (`sources` object and `layers` array).
    pub fn to_style_json(&self) -> Value {
        let sources: serde_json::Map<String, Value> = self
            .sources
            .iter()
            .map(|s| (s.id.clone(), s.spec.clone()))
            .collect();
        let layers: Vec<Value> = self.layers.iter().map(|l| l.spec.clone()).collect();
        json!({ "sources": sources, "layers": layers })
    }
}

fn geojson_source(feature: Value, promote_id: bool) -> Value {
    let mut spec = json!({ "type": "geojson", "data": feature });
    if promote_id {
        spec["promoteId"] = json!("id");
    }
    spec
}

fn basin_source(basin: &Basin) -> SourceSpec {
    let shape = basin.shape();
    let feature = json!({
        "type": "Feature",
        "geometry": shape.to_geojson(),
        "properties": {
            "id": basin.id,
            "kind": "basin",
            "name": basin.full_name,
            "displayName": basin.display_name,
            "surveyed": shape.is_surveyed(),
        },
    });
    SourceSpec {
        id: basin_source_id(&basin.id),
        spec: geojson_source(feature, true),
    }
}

fn basin_label_source(basin: &Basin) -> SourceSpec {
    let feature = json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": basin.label_position() },
        "properties": { "id": basin.id, "displayName": basin.display_name },
    });
    SourceSpec {
        id: basin_label_source_id(&basin.id),
        spec: geojson_source(feature, false),
    }
}

fn project_source(project: &ProjectSite) -> SourceSpec {
    let feature = json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": project.coordinates },
        "properties": {
            "id": project.id,
            "kind": "project",
            "basinId": project.basin_id,
            "name": project.name,
            "status": project.financials.status.to_string(),
        },
    });
    SourceSpec {
        id: project_source_id(&project.id),
        spec: geojson_source(feature, true),
    }
}

fn basin_fill_layer(basin: &Basin) -> LayerSpec {
    let id = basin_fill_layer_id(&basin.id);
    let source = basin_source_id(&basin.id);
    LayerSpec {
        spec: json!({
            "id": id,
            "type": "fill",
            "source": source,
            "paint": {
                "fill-color": when_hovered(json!(basin.color.hover), json!(basin.color.fill)),
                "fill-opacity": when_hovered(json!(0.5), json!(0.3)),
            },
        }),
        id,
        source,
        kind: LayerKind::Fill,
        target: Some(EntityRef::Basin {
            id: basin.id.clone(),
        }),
    }
}

fn basin_outline_layer(basin: &Basin) -> LayerSpec {
    let id = basin_outline_layer_id(&basin.id);
    let source = basin_source_id(&basin.id);
    LayerSpec {
        spec: json!({
            "id": id,
            "type": "line",
            "source": source,
            "paint": {
                "line-color": basin.color.stroke,
                "line-width": when_hovered(json!(3), json!(2)),
            },
        }),
        id,
        source,
        kind: LayerKind::Outline,
        target: None,
    }
}

fn basin_label_layer(basin: &Basin) -> LayerSpec {
    let id = basin_label_layer_id(&basin.id);
    let source = basin_label_source_id(&basin.id);
    LayerSpec {
        spec: json!({
            "id": id,
            "type": "symbol",
            "source": source,
            "layout": {
                "text-field": ["get", "displayName"],
                "text-size": 13,
                "text-font": ["DIN Pro Medium", "Arial Unicode MS Regular"],
                "text-anchor": "center",
                "text-allow-overlap": false,
            },
            "paint": {
                "text-color": LABEL_COLOR,
                "text-halo-color": "#FFFFFF",
                "text-halo-width": 1.5,
            },
        }),
        id,
        source,
        kind: LayerKind::Label,
        target: None,
    }
}

fn project_layer(project: &ProjectSite) -> LayerSpec {
    let id = project_layer_id(&project.id);
    let source = project_source_id(&project.id);
    LayerSpec {
        spec: json!({
            "id": id,
            "type": "circle",
            "source": source,
            "paint": {
                "circle-color": PROJECT_COLOR,
                "circle-radius": when_hovered(json!(9), json!(6)),
                "circle-stroke-color": "#FFFFFF",
                "circle-stroke-width": when_hovered(json!(3), json!(1.5)),
            },
        }),
        id,
        source,
        kind: LayerKind::Point,
        target: Some(EntityRef::Project {
            id: project.id.clone(),
            basin_id: project.basin_id.clone(),
        }),
    }
}
