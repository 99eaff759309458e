use eframe::egui;

use crate::action::Action;
use crate::command::Command;
use crate::layer::ImageAssetRef;

const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg"];

/// Turns files dropped onto the window into image uploads for the active
/// layer. Only the location is kept; the file is never read.
#[derive(Debug, Default)]
pub struct FileHandler;

impl FileHandler {
    pub fn new() -> Self {
        Self
    }

    /// Returns upload commands for the image files dropped this frame.
    ///
    /// egui reports each drop once, so dropping the same file again later
    /// uploads it again.
    pub fn take_dropped_files(&self, ctx: &egui::Context) -> Vec<Command> {
        ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| {
                    let location = file_location(file)?;
                    if !is_image(&location, &file.mime) {
                        log::warn!("Dropped file is not a supported image: {}", location);
                        return None;
                    }
                    log::info!("Image dropped: {}", location);
                    Some(Command::Dispatch(Action::Upload(Some(ImageAssetRef::new(location)))))
                })
                .collect()
        })
    }

    /// Preview files being dragged over the application
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Drop image to attach it to the selected layer:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else {
                    text += "\n(Path not available)";
                }
            }
            text
        });

        let painter = ctx.layer_painter(egui::LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(20.0),
            Color32::WHITE,
        );
    }
}

fn file_location(file: &egui::DroppedFile) -> Option<String> {
    if let Some(path) = &file.path {
        Some(path.display().to_string())
    } else if !file.name.is_empty() {
        Some(file.name.clone())
    } else {
        None
    }
}

/// Decides by MIME type when known, otherwise by extension
pub fn is_image(location: &str, mime: &str) -> bool {
    if !mime.is_empty() {
        return mime.starts_with("image/");
    }
    location
        .rsplit_once('.')
        .map(|(_, ext)| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_wins_over_extension() {
        assert!(is_image("upload", "image/png"));
        assert!(!is_image("logo.png", "application/pdf"));
    }

    #[test]
    fn test_extension_fallback() {
        assert!(is_image("/home/me/Logo.PNG", ""));
        assert!(is_image("mug.jpeg", ""));
        assert!(!is_image("notes.txt", ""));
        assert!(!is_image("README", ""));
    }

    fn drop_files(ctx: &egui::Context, handler: &FileHandler, names: &[&str]) -> Vec<Command> {
        let input = egui::RawInput {
            dropped_files: names
                .iter()
                .map(|name| egui::DroppedFile {
                    name: name.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        let mut commands = Vec::new();
        let _ = ctx.run(input, |ctx| commands = handler.take_dropped_files(ctx));
        commands
    }

    #[test]
    fn test_same_file_can_be_dropped_twice() {
        let ctx = egui::Context::default();
        let handler = FileHandler::new();
        let upload = Command::Dispatch(Action::Upload(Some(ImageAssetRef::new("logo.png"))));

        assert_eq!(drop_files(&ctx, &handler, &["logo.png", "notes.txt"]), vec![upload.clone()]);
        assert!(drop_files(&ctx, &handler, &[]).is_empty());
        assert_eq!(drop_files(&ctx, &handler, &["logo.png"]), vec![upload]);
    }
}
