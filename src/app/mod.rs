mod state;
mod ui;

use crate::api::HttpTalkingFaceClient;
use crate::config::AppConfig;
use crate::media::{LocalFileUrlProvider, MediaKind};
use crate::task::{DownloadState, TaskController};
use eframe::App;
use state::FormState;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{error, info, warn};

pub struct LipSyncApp {
    config: AppConfig,
    form: FormState,
    controller: TaskController,
    /// Key the controller's current client was built with.
    client_key: String,
}

impl LipSyncApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig, runtime: Handle) -> Self {
        info!("Initializing Lip-Sync Studio ({})", config.api_base_url);
        let client_key = config.api_key.clone();
        let controller = TaskController::new(
            Arc::new(HttpTalkingFaceClient::new(&config.api_base_url, &client_key)),
            Arc::new(LocalFileUrlProvider),
            runtime,
            config.poll_interval,
        );

        Self {
            form: FormState::with_api_key(config.api_key.clone()),
            config,
            controller,
            client_key,
        }
    }

    pub fn pick_file(&mut self, kind: MediaKind) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter(kind.to_string(), kind.extensions())
            .pick_file()
        else {
            return;
        };

        self.form.select(kind, &path);
    }

    pub fn preview_file(&self, kind: MediaKind) {
        if let Some(file) = self.form.slot(kind) {
            if let Err(e) = open::that(&file.path) {
                warn!("Could not open {}: {}", file.path.display(), e);
            }
        }
    }

    pub fn start_generation(&mut self) {
        self.refresh_client();
        self.form.notice = None;
        self.form.show_task_error = true;

        if let Err(e) = self
            .controller
            .submit(self.form.video.as_ref(), self.form.audio.as_ref())
        {
            if e.is_validation() {
                warn!("Submit refused: {}", e);
            } else {
                error!("Submit error: {}", e);
            }
        }
    }

    fn refresh_client(&mut self) {
        let key = self.form.api_key.trim();
        if key != self.client_key {
            info!("API key changed, rebuilding client");
            self.client_key = key.to_string();
            self.controller.set_api(Arc::new(HttpTalkingFaceClient::new(
                &self.config.api_base_url,
                &self.client_key,
            )));
        }
    }

    pub fn open_result(&self) {
        if let Some(url) = self.controller.lifecycle().result_url() {
            if let Err(e) = open::that(url) {
                warn!("Could not open {}: {}", url, e);
            }
        }
    }

    pub fn save_result(&mut self) {
        let Some(dest) = rfd::FileDialog::new()
            .set_file_name("lipsync.mp4")
            .add_filter("Video", &["mp4"])
            .save_file()
        else {
            return;
        };

        if let Err(e) = self.controller.download_result(dest) {
            error!("Cannot save result: {}", e);
        }
    }

    pub fn reset_form(&mut self) {
        info!("Clearing selected files");
        self.form.clear();
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if self.controller.process_events() {
            ctx.request_repaint();
        }

        // Background outcomes only land when a frame runs.
        let downloading = *self.controller.download_state() == DownloadState::InProgress;
        if self.controller.lifecycle().is_active() || downloading {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

impl App for LipSyncApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
