//! Printer identity to scene representation.
//!
//! The registry mirrors every change into the [`SceneGraph`] port so the
//! renderer's scene and the core's bookkeeping stay in step.

use crate::color::Rgb;
use crate::constants::*;
use crate::labels::{label_size, world_anchor};
use crate::printer::Printer;
use crate::scene::{FlattenAxis, NodeKey, NodeStyle, SceneGraph};
use fnv::FnvHashMap;
use glam::{Vec2, Vec3};

/// Scene-side state for one printer.
#[derive(Clone, Debug, PartialEq)]
pub struct Representation {
    pub size: Vec3,
    pub base_color: Rgb,
    pub style: NodeStyle,
    pub position: Vec2,
    pub visible: bool,
    pub flatten: Option<FlattenAxis>,
}

impl Representation {
    #[inline]
    pub fn volume(&self) -> f32 {
        self.size.x * self.size.y * self.size.z
    }

    #[inline]
    pub fn footprint(&self) -> Vec2 {
        Vec2::new(self.size.x, self.size.y)
    }
}

/// Resting box style for a base color.
pub fn base_style(color: Rgb) -> NodeStyle {
    NodeStyle {
        fill_color: color,
        fill_opacity: FILL_OPACITY,
        edge_color: color,
        edge_opacity: EDGE_OPACITY,
    }
}

/// Emphasised box style; always derived from the base color.
pub fn hover_style(color: Rgb) -> NodeStyle {
    let lit = color.lighten(HOVER_LIGHTEN);
    NodeStyle {
        fill_color: lit,
        fill_opacity: FILL_OPACITY_HOVER,
        edge_color: lit,
        edge_opacity: EDGE_OPACITY_HOVER,
    }
}

/// Name tag for a printer that has been shown at least once.
#[derive(Clone, Debug, PartialEq)]
pub struct NameLabel {
    pub anchor: Vec3,
    pub size: Vec2,
    pub position: Vec3,
    pub visible: bool,
    pub base_opacity: f32,
    pub opacity: f32,
}

#[derive(Debug, Default)]
pub struct ObjectRegistry {
    objects: FnvHashMap<String, Representation>,
    labels: FnvHashMap<String, NameLabel>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Representation> {
        self.objects.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Representation> {
        self.objects.get_mut(name)
    }

    pub fn label(&self, name: &str) -> Option<&NameLabel> {
        self.labels.get(name)
    }

    pub fn label_mut(&mut self, name: &str) -> Option<&mut NameLabel> {
        self.labels.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.objects.get(name).map(|r| r.visible).unwrap_or(false)
    }

    pub fn labels(&self) -> impl Iterator<Item = (&str, &NameLabel)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Create the representation for `printer` unless one exists. Replacing a
    /// printer requires [`ObjectRegistry::remove`] first.
    pub fn upsert<S: SceneGraph>(
        &mut self,
        scene: &mut S,
        printer: &Printer,
        start_visible: bool,
        flatten: Option<FlattenAxis>,
    ) -> bool {
        if self.objects.contains_key(&printer.name) {
            log::debug!("[registry] {} already present", printer.name);
            return false;
        }
        let style = base_style(printer.color);
        scene.add_box(&printer.name, printer.dims(), &style);
        let key = NodeKey::Printer(&printer.name);
        scene.set_transform(key, Vec3::ZERO, FlattenAxis::scale(flatten));
        scene.set_visible(key, start_visible);
        self.objects.insert(
            printer.name.clone(),
            Representation {
                size: printer.dims(),
                base_color: printer.color,
                style,
                position: Vec2::ZERO,
                visible: start_visible,
                flatten,
            },
        );
        if start_visible {
            self.ensure_label(scene, &printer.name);
        }
        true
    }

    /// Toggle visibility; the label is created the first time a printer shows.
    pub fn set_visible<S: SceneGraph>(&mut self, scene: &mut S, name: &str, visible: bool) -> bool {
        let Some(rep) = self.objects.get_mut(name) else {
            log::warn!("[registry] set_visible on unknown printer {}", name);
            return false;
        };
        rep.visible = visible;
        scene.set_visible(NodeKey::Printer(name), visible);
        if visible {
            self.ensure_label(scene, name);
        }
        if let Some(label) = self.labels.get_mut(name) {
            label.visible = visible;
        }
        true
    }

    fn ensure_label<S: SceneGraph>(&mut self, scene: &mut S, name: &str) {
        if self.labels.contains_key(name) {
            return;
        }
        let Some(rep) = self.objects.get(name) else {
            return;
        };
        scene.add_label(name, name);
        self.labels.insert(
            name.to_string(),
            NameLabel {
                anchor: world_anchor(name, rep.size),
                size: label_size(name),
                position: Vec3::ZERO,
                visible: rep.visible,
                base_opacity: LABEL_BASE_OPACITY,
                opacity: LABEL_BASE_OPACITY,
            },
        );
    }

    /// Delete the representation and its label from the registry and scene.
    pub fn remove<S: SceneGraph>(&mut self, scene: &mut S, name: &str) -> bool {
        let had_label = self.labels.remove(name).is_some();
        if had_label {
            scene.remove_label(name);
        }
        match self.objects.remove(name) {
            Some(_) => {
                scene.remove_node(NodeKey::Printer(name));
                true
            }
            None => had_label,
        }
    }

    /// Apply the same flatten to every representation.
    pub fn set_flatten<S: SceneGraph>(&mut self, scene: &mut S, flatten: Option<FlattenAxis>) {
        for (name, rep) in self.objects.iter_mut() {
            rep.flatten = flatten;
            scene.set_transform(
                NodeKey::Printer(name),
                rep.position.extend(0.0),
                FlattenAxis::scale(flatten),
            );
        }
    }

    /// Move a representation and push the transform to the scene.
    pub fn set_position<S: SceneGraph>(&mut self, scene: &mut S, name: &str, position: Vec2) {
        if let Some(rep) = self.objects.get_mut(name) {
            rep.position = position;
            scene.set_transform(
                NodeKey::Printer(name),
                position.extend(0.0),
                FlattenAxis::scale(rep.flatten),
            );
        }
    }

    /// Hover emphasis. Styles are always rebuilt from the stored base values
    /// so repeated hovers never compound.
    pub fn highlight<S: SceneGraph>(&mut self, scene: &mut S, name: &str, on: bool) {
        if let Some(rep) = self.objects.get_mut(name) {
            if rep.visible {
                rep.style = if on {
                    hover_style(rep.base_color)
                } else {
                    base_style(rep.base_color)
                };
                scene.set_style(NodeKey::Printer(name), &rep.style);
            }
        }
        if let Some(label) = self.labels.get_mut(name) {
            label.opacity = if on {
                LABEL_HOVER_OPACITY
            } else {
                label.base_opacity
            };
            scene.place_label(name, label.position, label.visible, label.opacity);
        }
    }

    /// Store a computed label position and push it to the scene.
    pub fn place_label<S: SceneGraph>(&mut self, scene: &mut S, name: &str, position: Vec3) {
        let visible = self.is_visible(name);
        if let Some(label) = self.labels.get_mut(name) {
            label.position = position;
            label.visible = visible;
            scene.place_label(name, position, visible, label.opacity);
        }
    }
}
