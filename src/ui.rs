use egui::Context;
use glam::Vec3;

use crate::controller::ParamEdit;
use crate::model::{Light, Material};

/// Draw the "Parameters" window and report which controls changed this frame.
///
/// The panel never writes into shared state itself; every change comes back
/// as a [`ParamEdit`] so the caller can store and forward it.
pub fn parameters_window(
    ctx: &Context,
    material: &Material,
    light: &Light,
    fps: f32,
) -> Vec<ParamEdit> {
    let mut edits = Vec::new();

    egui::Window::new("Parameters")
        .default_pos([8.0, 8.0])
        .show(ctx, |ui| {
            ui.label(format!("Frame Rate: {:.0}", fps));
            ui.label("left click to move camera,\nscroll mousewheel to zoom in/out");
            ui.separator();

            ui.collapsing("Material", |ui| {
                if let Some(v) = color_row(ui, "Ambient", material.ambient) {
                    edits.push(ParamEdit::Ambient(v));
                }
                if let Some(v) = color_row(ui, "Diffuse", material.diffuse) {
                    edits.push(ParamEdit::Diffuse(v));
                }
                if let Some(v) = color_row(ui, "Specular", material.specular) {
                    edits.push(ParamEdit::Specular(v));
                }

                let mut shininess = material.shininess;
                let range = Material::MIN_SHININESS..=Material::MAX_SHININESS;
                if ui
                    .add(egui::Slider::new(&mut shininess, range).text("Shininess"))
                    .changed()
                {
                    edits.push(ParamEdit::Shininess(shininess));
                }
            });

            ui.collapsing("Light", |ui| {
                let mut pos = light.position.to_array();
                let mut changed = false;
                ui.horizontal(|ui| {
                    for value in &mut pos {
                        changed |= ui.add(egui::DragValue::new(value).speed(0.1)).changed();
                    }
                    ui.label("position");
                });
                if changed {
                    edits.push(ParamEdit::LightPosition(Vec3::from_array(pos)));
                }

                let mut intensity = light.intensity;
                if ui
                    .add(egui::Slider::new(&mut intensity, 0.0..=1.0).text("intensity"))
                    .changed()
                {
                    edits.push(ParamEdit::LightIntensity(intensity));
                }
            });
        });

    edits
}

/// RGB color edit with a label; returns the new value if it changed.
fn color_row(ui: &mut egui::Ui, label: &str, current: Vec3) -> Option<Vec3> {
    let mut rgb = current.to_array();
    let mut changed = false;
    ui.horizontal(|ui| {
        changed = ui.color_edit_button_rgb(&mut rgb).changed();
        ui.label(label);
    });
    changed.then(|| Vec3::from_array(rgb))
}
