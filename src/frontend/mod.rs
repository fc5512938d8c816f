//! Frontend module for the egui viewer
//!
//! One window, one digitizing session at a time. The app owns the queue of
//! chart images, decodes input into commands, feeds them to the active
//! [`Session`] and repaints the canvas from the resulting state.
//!
//! # Architecture
//!
//! - [`PlotDigApp`] - main application state implementing [`eframe::App`]
//! - `input` - decoding pointer and keyboard gestures into commands
//! - `paint` - drawing the canvas from session state
//!
//! Closing the window ends the active session and moves on to the next
//! queued image; the window only really closes once the queue is empty.
//! Images that fail to open or decode are skipped with an error in the
//! status banner.

pub mod input;
pub mod paint;

pub use paint::CanvasContext;

use crate::error::{PlotDigError, Result};
use crate::session::{Command, Flow, Session};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Main application state for the plot digitizer
pub struct PlotDigApp {
    /// Images not yet digitized, front is next
    queue: VecDeque<PathBuf>,
    active: Option<ActiveSession>,
    last_error: Option<String>,
}

/// A running session together with its uploaded chart texture
struct ActiveSession {
    session: Session,
    texture: egui::TextureHandle,
}

impl PlotDigApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, images: Vec<PathBuf>) -> Self {
        Self {
            queue: images.into(),
            active: None,
            last_error: None,
        }
    }

    /// Start the next queued session, skipping images that fail to open
    fn start_next_session(&mut self, ctx: &egui::Context) {
        while let Some(path) = self.queue.pop_front() {
            match open_session(ctx, &path) {
                Ok(active) => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                        "Plot Digitizer - {}",
                        active.session.image_path().display()
                    )));
                    self.active = Some(active);
                    return;
                }
                Err(e) => {
                    tracing::error!("Skipping {}: {}", path.display(), e);
                    self.last_error = Some(e.to_string());
                }
            }
        }
    }
}

impl eframe::App for PlotDigApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.active.is_none() {
            self.start_next_session(ctx);
            if self.active.is_none() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        }

        let close_requested = ctx.input(|i| i.viewport().close_requested());
        let mut end_session = false;

        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click());
                if let Some(active) = &mut self.active {
                    let mut commands =
                        input::collect_commands(ui, &response, active.session.mode());
                    if close_requested {
                        commands.push(Command::Quit);
                    }

                    for command in commands {
                        match active.session.apply(command) {
                            Ok(Flow::Continue) => {}
                            Ok(Flow::EndSession) => {
                                end_session = true;
                                break;
                            }
                            Err(e) => {
                                tracing::error!("{}", e);
                                self.last_error = Some(e.to_string());
                            }
                        }
                    }

                    paint::render_canvas(
                        &painter,
                        response.rect,
                        &CanvasContext {
                            session: &active.session,
                            texture: Some(&active.texture),
                            pointer: response.hover_pos(),
                            last_error: self.last_error.as_deref(),
                        },
                    );
                }
            });

        if end_session {
            self.active = None;
            self.last_error = None;
            if !self.queue.is_empty() {
                // Keep the window alive for the next queued image.
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                ctx.request_repaint();
            }
        }
    }
}

fn open_session(ctx: &egui::Context, path: &Path) -> Result<ActiveSession> {
    let session = Session::open(path)?;
    let texture = load_texture(ctx, path)?;
    Ok(ActiveSession { session, texture })
}

/// Decode the chart image and upload it as a nearest-filtered texture, so
/// pixels stay crisp when zoomed in
fn load_texture(ctx: &egui::Context, path: &Path) -> Result<egui::TextureHandle> {
    let image = image::open(path)
        .map_err(|e| PlotDigError::Image(format!("{}: {}", path.display(), e)))?
        .to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    let pixels = image.into_raw();
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
    Ok(ctx.load_texture(
        path.display().to_string(),
        color_image,
        egui::TextureOptions::NEAREST,
    ))
}
