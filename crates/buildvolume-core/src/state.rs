//! Application state shared with the web frontend.
//!
//! [`Viewer`] owns everything the page can change and re-runs the layout
//! pipeline synchronously after each change:
//!
//! 1. place visible printers for the current [`AlignMode`] and center them;
//! 2. park the reference model on the smallest visible printer;
//! 3. recompute [`SceneBounds`] and reframe the camera;
//! 4. reposition name labels for the current camera mode.
//!
//! Camera tweens and gizmo inertia only advance inside [`Viewer::tick`].

use crate::bounds::{compute_bounds, AxisGuide, BoxExtent, GridSpec, ModelExtent, SceneBounds};
use crate::camera::{viewport_aspect, Camera, CameraRig};
use crate::color::Rgb;
use crate::constants::{LABEL_HOVER_RADIUS_PX, REFERENCE_DEFAULT_COLOR};
use crate::error::{Error, Result};
use crate::gizmo::{GizmoFace, GizmoOrbit};
use crate::labels::{anchor_2d, nearest_label, order_2d, place_label_2d, place_label_3d};
use crate::layout::{
    centering_offset, compute_placements, smallest_by_volume, AlignMode, LayoutItem,
};
use crate::printer::{Catalog, CustomPrinterInput, Printer};
use crate::reference::{reference_style, ReferenceModel, ReferenceModelKind};
use crate::registry::ObjectRegistry;
use crate::scene::{FlattenAxis, NodeKey, SceneGraph};
use crate::stl::TriangleMesh;
use crate::theme::Theme;
use glam::{Vec2, Vec3};
use std::time::Duration;

/// Size of the main drawing surface in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Touch-first devices get a coarser grid.
    pub coarse_pointer: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            coarse_pointer: false,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            coarse_pointer: false,
        }
    }

    pub fn aspect(&self) -> f32 {
        viewport_aspect(self.width, self.height)
    }
}

/// The selected reference model and its display settings.
#[derive(Clone, Debug)]
pub struct ReferenceSlot {
    pub kind: ReferenceModelKind,
    /// `None` until the asset has been fetched and decoded.
    pub model: Option<ReferenceModel>,
    pub visible: bool,
    pub color: Rgb,
}

impl Default for ReferenceSlot {
    fn default() -> Self {
        Self {
            kind: ReferenceModelKind::default(),
            model: None,
            visible: true,
            color: Rgb::parse_hex(REFERENCE_DEFAULT_COLOR).unwrap_or(Rgb::GREY),
        }
    }
}

impl ReferenceSlot {
    /// Extent that participates in bounds: loaded and shown.
    pub fn extent(&self) -> Option<ModelExtent> {
        match &self.model {
            Some(m) if self.visible => Some(ModelExtent {
                position: m.position,
                size: m.size,
            }),
            _ => None,
        }
    }
}

pub struct Viewer<S: SceneGraph> {
    scene: S,
    catalog: Catalog,
    registry: ObjectRegistry,
    align: AlignMode,
    rig: CameraRig,
    flatten: Option<FlattenAxis>,
    reference: ReferenceSlot,
    theme: Theme,
    viewport: Viewport,
    hovered: Option<String>,
    bounds: SceneBounds,
    gizmo: GizmoOrbit,
    show_axes: bool,
}

impl<S: SceneGraph> Viewer<S> {
    pub fn new(scene: S, viewport: Viewport) -> Self {
        let mut viewer = Self {
            scene,
            catalog: Catalog::default(),
            registry: ObjectRegistry::new(),
            align: AlignMode::default(),
            rig: CameraRig::default(),
            flatten: None,
            reference: ReferenceSlot::default(),
            theme: Theme::default(),
            viewport,
            hovered: None,
            bounds: SceneBounds::fallback(),
            gizmo: GizmoOrbit::default(),
            show_axes: true,
        };
        viewer.rig.camera.aspect = viewport.aspect();
        viewer.refresh();
        viewer
    }

    /// Install the catalog. Every printer gets a hidden representation so
    /// toggling later never allocates scene nodes.
    pub fn load_catalog(&mut self, printers: Vec<Printer>) {
        log::info!("[viewer] catalog loaded: {} printers", printers.len());
        for printer in printers {
            self.catalog.upsert(printer);
        }
        for printer in self.catalog.printers() {
            self.registry
                .upsert(&mut self.scene, printer, false, self.flatten);
        }
        self.refresh();
    }

    // Accessors

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn camera(&self) -> &Camera {
        &self.rig.camera
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn bounds(&self) -> &SceneBounds {
        &self.bounds
    }

    pub fn grid(&self) -> GridSpec {
        GridSpec::for_bounds(&self.bounds, self.viewport.coarse_pointer)
    }

    pub fn axis_guide(&self) -> AxisGuide {
        AxisGuide::for_bounds(&self.bounds)
    }

    pub fn align_mode(&self) -> AlignMode {
        self.align
    }

    pub fn flatten(&self) -> Option<FlattenAxis> {
        self.flatten
    }

    pub fn is_2d(&self) -> bool {
        self.rig.is_2d()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn reference(&self) -> &ReferenceSlot {
        &self.reference
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn hovered_printer(&self) -> Option<&Printer> {
        self.hovered.as_deref().and_then(|n| self.catalog.get(n))
    }

    pub fn show_axes(&self) -> bool {
        self.show_axes
    }

    pub fn is_printer_visible(&self, name: &str) -> bool {
        self.registry.is_visible(name)
    }

    pub fn visible_count(&self) -> usize {
        self.catalog
            .printers()
            .iter()
            .filter(|p| self.registry.is_visible(&p.name))
            .count()
    }

    pub fn filtered_printers(&self, query: &str) -> Vec<&Printer> {
        self.catalog.filter(query)
    }

    // Printer selection

    /// Show or hide a catalog printer. Returns false for unknown names.
    pub fn set_printer_visible(&mut self, name: &str, visible: bool) -> bool {
        let Some(printer) = self.catalog.get(name) else {
            log::warn!("[viewer] unknown printer {}", name);
            return false;
        };
        if !self.registry.contains(name) {
            let printer = printer.clone();
            self.registry
                .upsert(&mut self.scene, &printer, false, self.flatten);
        }
        if self.registry.is_visible(name) == visible {
            return true;
        }
        if !visible && self.hovered.as_deref() == Some(name) {
            self.registry.highlight(&mut self.scene, name, false);
            self.hovered = None;
        }
        self.registry.set_visible(&mut self.scene, name, visible);
        log::info!(
            "[viewer] {} {}",
            name,
            if visible { "shown" } else { "hidden" }
        );
        self.refresh();
        true
    }

    pub fn toggle_printer(&mut self, name: &str) -> bool {
        let visible = self.registry.is_visible(name);
        self.set_printer_visible(name, !visible)
    }

    /// Add a printer from the custom form, replacing any printer with the
    /// same name regardless of case. Invalid input changes nothing.
    /// Returns the stored name.
    pub fn add_custom_printer(&mut self, input: CustomPrinterInput) -> Option<String> {
        let printer = input.into_printer(self.catalog.len())?;
        if let Some(idx) = self.catalog.position_ignore_case(&printer.name) {
            let old = self.catalog.printers()[idx].name.clone();
            if self.hovered.as_deref() == Some(old.as_str()) {
                self.hovered = None;
            }
            self.registry.remove(&mut self.scene, &old);
            log::info!("[viewer] replacing printer {}", old);
        }
        let name = printer.name.clone();
        self.registry
            .upsert(&mut self.scene, &printer, true, self.flatten);
        self.catalog.upsert(printer);
        log::info!("[viewer] custom printer {} added", name);
        self.refresh();
        Some(name)
    }

    pub fn set_align_mode(&mut self, mode: AlignMode) {
        if self.align == mode {
            return;
        }
        self.align = mode;
        log::info!("[viewer] align mode {}", mode.key());
        self.refresh();
    }

    // Camera

    /// Switch between the orbit view and the top-down footprint view.
    /// Entering flattens every object along Z; leaving removes the flatten.
    pub fn set_2d_mode(&mut self, on: bool) {
        if self.rig.is_2d() == on {
            return;
        }
        if on {
            self.gizmo = GizmoOrbit::default();
            self.apply_flatten(Some(FlattenAxis::Z));
            self.rig.enter_2d(&self.bounds);
        } else {
            self.apply_flatten(None);
            self.rig.exit_2d(&self.bounds);
        }
        self.update_labels();
    }

    pub fn toggle_2d_mode(&mut self) {
        self.set_2d_mode(!self.rig.is_2d());
    }

    /// Wheel over the main view. In 2D any wheel returns to 3D without
    /// zooming; otherwise the distance is multiplied by `zoom_factor`.
    pub fn on_wheel(&mut self, zoom_factor: f32) {
        if self.rig.is_2d() {
            self.set_2d_mode(false);
            return;
        }
        self.rig.zoom(zoom_factor);
        self.update_labels();
    }

    /// A drag started on the main view.
    pub fn begin_orbit_drag(&mut self) {
        self.exit_flatten();
    }

    /// Orbit by angle deltas in radians. Ignored in 2D.
    pub fn orbit_drag(&mut self, d_azimuth: f32, d_polar: f32) {
        self.rig.orbit(d_azimuth, d_polar);
        self.update_labels();
    }

    /// Pan by a pointer delta in pixels.
    pub fn pan_drag(&mut self, dx: f32, dy: f32) {
        self.rig.pan(dx, dy, self.viewport.height);
        self.update_labels();
    }

    pub fn end_orbit_drag(&mut self) {
        self.update_labels();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.rig.resize(self.viewport.aspect(), &self.bounds);
        self.update_labels();
    }

    pub fn set_coarse_pointer(&mut self, coarse: bool) {
        self.viewport.coarse_pointer = coarse;
    }

    // Orientation gizmo

    /// Snap to a face and flatten along its dominant axis. The top-down view
    /// is locked, so clicks are ignored there.
    pub fn gizmo_face_clicked(&mut self, face: GizmoFace) {
        if self.rig.is_2d() {
            return;
        }
        self.gizmo = GizmoOrbit::default();
        self.rig.snap_to_direction(face.view());
        self.apply_flatten(Some(FlattenAxis::from_view(face.view())));
        log::info!("[viewer] gizmo snap {}", face.label());
        self.update_labels();
    }

    pub fn gizmo_drag_start(&mut self) {
        if self.rig.is_2d() {
            return;
        }
        let (polar, azimuth) = self.rig.pivot_angles();
        self.gizmo.start(polar, azimuth);
    }

    /// Pointer moved with a button held over the gizmo. Dragging leaves any
    /// flattened view.
    pub fn gizmo_drag_move(&mut self, dx: f32, dy: f32) {
        if self.rig.is_2d() {
            return;
        }
        self.gizmo.drag(dx, dy);
        self.exit_flatten();
    }

    pub fn gizmo_drag_end(&mut self) {
        self.gizmo.release();
    }

    pub fn gizmo_orbit(&self) -> &GizmoOrbit {
        &self.gizmo
    }

    // Reference model

    /// Choose a reference model. The current one is dropped and the asset
    /// path to fetch is returned.
    pub fn select_reference_model(&mut self, kind: ReferenceModelKind) -> &'static str {
        if self.reference.model.take().is_some() {
            self.scene.remove_node(NodeKey::Reference);
        }
        self.reference.kind = kind;
        log::info!("[viewer] loading reference {}", kind.display_name());
        self.refresh();
        kind.asset_path()
    }

    /// A fetched model finished decoding. Results for a model that is no
    /// longer selected are discarded.
    pub fn reference_model_loaded(&mut self, kind: ReferenceModelKind, mesh: TriangleMesh) {
        if kind != self.reference.kind {
            log::debug!("[viewer] discarding stale {} mesh", kind.display_name());
            return;
        }
        if self.reference.model.is_some() {
            self.scene.remove_node(NodeKey::Reference);
        }
        let model = ReferenceModel::new(kind, mesh);
        log::info!(
            "[viewer] {} loaded: {} triangles, {:.1} x {:.1} x {:.1} mm",
            kind.display_name(),
            model.mesh.triangle_count(),
            model.size.x,
            model.size.y,
            model.size.z
        );
        self.scene.add_mesh(
            NodeKey::Reference,
            &model.mesh,
            &reference_style(self.reference.color),
        );
        self.scene
            .set_visible(NodeKey::Reference, self.reference.visible);
        self.reference.model = Some(model);
        self.refresh();
    }

    pub fn reference_model_failed(&mut self, kind: ReferenceModelKind, err: &Error) {
        log::error!("[viewer] failed to load {}: {}", kind.display_name(), err);
        if kind == self.reference.kind && self.reference.model.take().is_some() {
            self.scene.remove_node(NodeKey::Reference);
            self.refresh();
        }
    }

    pub fn set_reference_visible(&mut self, visible: bool) {
        if self.reference.visible == visible {
            return;
        }
        self.reference.visible = visible;
        if self.reference.model.is_some() {
            self.scene.set_visible(NodeKey::Reference, visible);
        }
        self.refresh();
    }

    /// Recolor the reference model from a `#rrggbb` string.
    pub fn set_reference_color(&mut self, hex: &str) -> Result<()> {
        let color = Rgb::parse_hex(hex)?;
        self.reference.color = color;
        if self.reference.model.is_some() {
            self.scene
                .set_style(NodeKey::Reference, &reference_style(color));
        }
        Ok(())
    }

    // Appearance

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn set_axes_visible(&mut self, visible: bool) {
        self.show_axes = visible;
    }

    /// Update hover emphasis for a pointer at `pointer` CSS pixels, or
    /// `None` when the pointer left the view. Returns true if the hovered
    /// printer changed.
    pub fn hover(&mut self, pointer: Option<Vec2>) -> bool {
        let picked = pointer.and_then(|p| self.label_under(p));
        self.hover_printer(picked.as_deref())
    }

    /// Emphasise `name` (or nothing), e.g. while its list row is hovered.
    pub fn hover_printer(&mut self, name: Option<&str>) -> bool {
        if name == self.hovered.as_deref() {
            return false;
        }
        if let Some(old) = self.hovered.take() {
            self.registry.highlight(&mut self.scene, &old, false);
        }
        if let Some(name) = name {
            self.registry.highlight(&mut self.scene, name, true);
        }
        self.hovered = name.map(str::to_string);
        true
    }

    fn label_under(&self, pointer: Vec2) -> Option<String> {
        let camera = &self.rig.camera;
        let (w, h) = (self.viewport.width, self.viewport.height);
        let projected: Vec<(&str, Vec2)> = self
            .registry
            .labels()
            .filter(|(_, label)| label.visible)
            .filter_map(|(name, label)| {
                camera
                    .world_to_screen(label.position, w, h)
                    .map(|p| (name, p))
            })
            .collect();
        nearest_label(projected, pointer, LABEL_HOVER_RADIUS_PX).map(str::to_string)
    }

    /// Advance animations by `dt`. Returns true while anything moved.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let mut moved = false;
        if !self.rig.is_2d() {
            if let Some((polar, azimuth)) = self.gizmo.step() {
                self.rig.orbit_pivot_to(polar, azimuth);
                moved = true;
            }
        }
        moved |= self.rig.tick(dt);
        if moved {
            self.update_labels();
        }
        moved
    }

    // Pipeline

    fn exit_flatten(&mut self) {
        if self.flatten.is_some() {
            self.apply_flatten(None);
        }
    }

    fn apply_flatten(&mut self, axis: Option<FlattenAxis>) {
        self.flatten = axis;
        self.registry.set_flatten(&mut self.scene, axis);
        if let Some(model) = &self.reference.model {
            self.scene.set_transform(
                NodeKey::Reference,
                model.position,
                FlattenAxis::scale(axis),
            );
        }
    }

    /// Layout, reference placement, bounds, reframe and labels.
    pub fn refresh(&mut self) {
        let items: Vec<LayoutItem<'_>> = self
            .catalog
            .printers()
            .iter()
            .filter(|p| self.registry.is_visible(&p.name))
            .map(|p| LayoutItem {
                name: &p.name,
                size: p.dims(),
            })
            .collect();

        let mut placements = compute_placements(&items, self.align);
        // Row placements come back in volume order, so pair by name
        let footprints = placements.iter().filter_map(|(name, pos)| {
            items
                .iter()
                .find(|it| it.name == *name)
                .map(|it| (*pos, Vec2::new(it.size.x, it.size.y)))
        });
        if let Some(offset) = centering_offset(footprints) {
            for (_, pos) in placements.iter_mut() {
                *pos += offset;
            }
        }
        let smallest = smallest_by_volume(&items).map(|i| items[i].name.to_string());
        let placements: Vec<(String, Vec2)> = placements
            .into_iter()
            .map(|(name, pos)| (name.to_string(), pos))
            .collect();

        for (name, pos) in &placements {
            self.registry.set_position(&mut self.scene, name, *pos);
        }

        let reference_xy = smallest
            .as_deref()
            .and_then(|name| self.registry.get(name))
            .map(|rep| rep.position)
            .unwrap_or(Vec2::ZERO);
        if let Some(model) = self.reference.model.as_mut() {
            model.position = reference_xy.extend(0.0);
            self.scene.set_transform(
                NodeKey::Reference,
                model.position,
                FlattenAxis::scale(self.flatten),
            );
        }

        let boxes = self.catalog.printers().iter().filter_map(|p| {
            self.registry.get(&p.name).map(|rep| BoxExtent {
                position: rep.position,
                size: rep.size,
                visible: rep.visible,
            })
        });
        self.bounds = compute_bounds(boxes, self.reference.extent());
        self.rig.reframe(&self.bounds);
        self.gizmo = GizmoOrbit::default();
        log::debug!(
            "[viewer] refresh: {} visible, bounds {:?}..{:?}",
            placements.len(),
            self.bounds.min,
            self.bounds.max
        );
        self.update_labels();
    }

    fn update_labels(&mut self) {
        let placed: Vec<(String, Vec3)> = if self.rig.is_2d() {
            let visible = self
                .registry
                .labels()
                .filter(|(_, label)| label.visible)
                .map(|(name, _)| name);
            order_2d(visible)
                .into_iter()
                .enumerate()
                .filter_map(|(i, name)| {
                    let rep = self.registry.get(name)?;
                    let label = self.registry.label(name)?;
                    let pos = place_label_2d(
                        rep.position,
                        rep.footprint(),
                        label.size,
                        anchor_2d(i),
                    );
                    Some((name.to_string(), pos))
                })
                .collect()
        } else {
            let camera_z = self.rig.camera.eye.z;
            self.registry
                .labels()
                .filter_map(|(name, label)| {
                    let rep = self.registry.get(name)?;
                    Some((
                        name.to_string(),
                        place_label_3d(rep.position, label.anchor, camera_z),
                    ))
                })
                .collect()
        };
        for (name, pos) in placed {
            self.registry.place_label(&mut self.scene, &name, pos);
        }
    }
}
