use anyhow::Context as _;
use eframe::egui;
use egui::{Color32, Margin, RichText};
use log::{error, info, warn};
use meeting_clock::catalog::ZoneCatalog;
use meeting_clock::clock::live::{self, LiveReading};
use meeting_clock::clock::{
    Instant, Side, SyncEvent, SyncState, TzFormatter, WallClockConverter, ZoneId,
};
use meeting_clock::config::AppConfig;
use meeting_clock::template::{MeetingLine, MeetingTemplate};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const TICK: Duration = Duration::from_secs(1);

enum Message {
    ConfigLoaded(Result<Startup, String>),
}

struct Startup {
    config: AppConfig,
    template: MeetingTemplate,
}

fn load_startup() -> anyhow::Result<Startup> {
    let config = AppConfig::load().context("Failed to load config")?;
    for entry in config.catalog().unresolvable() {
        warn!("Catalog zone '{}' ({}) is not in the timezone database", entry.zone_id, entry.label);
    }
    let template = config
        .meeting_template()
        .context("Failed to load meeting template")?;
    Ok(Startup { config, template })
}

pub struct MeetingClockApp {
    converter: WallClockConverter<TzFormatter>,
    catalog: ZoneCatalog,
    // None only if the built-in template fails to parse
    template: Option<MeetingTemplate>,
    state: SyncState,
    extra_zones: Vec<ZoneId>,

    // Edit buffers for the two wall-clock fields
    text_a: String,
    text_b: String,

    status_message: String,
    config_loaded: bool,
    receiver: mpsc::Receiver<Message>,
}

impl Default for MeetingClockApp {
    fn default() -> Self {
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            let result = load_startup().map_err(|e| format!("{:#}", e));
            sender.send(Message::ConfigLoaded(result)).ok();
        });

        let catalog = ZoneCatalog::default();
        let converter = WallClockConverter::new(catalog.formatter());
        let state = SyncState::initial(
            ZoneId::new("America/New_York"),
            ZoneId::new("Europe/London"),
            Instant::now(),
            &converter,
        );
        let template = MeetingTemplate::builtin()
            .map_err(|e| error!("Built-in meeting template is broken: {}", e))
            .ok();

        let mut app = Self {
            converter,
            catalog,
            template,
            state,
            extra_zones: Vec::new(),
            text_a: String::new(),
            text_b: String::new(),
            status_message: "Loading configuration...".to_string(),
            config_loaded: false,
            receiver,
        };
        app.sync_buffers();
        app
    }
}

impl MeetingClockApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        cc.egui_ctx.set_theme(egui::Theme::Light);
        Self::default()
    }

    fn apply_startup(&mut self, startup: Startup) {
        let Startup { config, template } = startup;
        self.catalog = config.catalog();
        self.converter = WallClockConverter::new(self.catalog.formatter());
        self.template = Some(template);
        self.extra_zones = config.clock.extra_zones.clone();
        if self.state.is_pristine() {
            self.state = SyncState::initial(
                config.zones.a.clone(),
                config.zones.b.clone(),
                Instant::now(),
                &self.converter,
            );
            self.sync_buffers();
        } else {
            info!("Fields edited before config loaded; keeping them");
        }
        info!("Time tools ready with {} zones", self.catalog.entries().len());
    }

    fn apply(&mut self, event: SyncEvent) {
        self.state = self.state.apply(event, &self.converter);
        self.sync_buffers();
    }

    fn sync_buffers(&mut self) {
        self.text_a = self.state.field(Side::A).text.clone();
        self.text_b = self.state.field(Side::B).text.clone();
    }

    fn ui_field_row(&mut self, ui: &mut egui::Ui, side: Side) {
        let current = self.state.field(side).zone.clone();
        let mut chosen: Option<ZoneId> = None;

        let (name, salt) = match side {
            Side::A => ("A", "zone_a"),
            Side::B => ("B", "zone_b"),
        };
        ui.label(format!("Zone {}:", name));
        egui::ComboBox::from_id_salt(salt)
            .selected_text(self.catalog.label_for(&current))
            .width(160.0)
            .show_ui(ui, |ui| {
                for entry in self.catalog.entries() {
                    if ui
                        .selectable_label(entry.zone_id == current, &entry.label)
                        .clicked()
                    {
                        chosen = Some(entry.zone_id.clone());
                    }
                }
            });

        let buffer = match side {
            Side::A => &mut self.text_a,
            Side::B => &mut self.text_b,
        };
        let response = ui.add(
            egui::TextEdit::singleline(&mut *buffer)
                .hint_text("YYYY-MM-DDTHH:MM")
                .desired_width(160.0),
        );
        let edited = response.changed().then(|| buffer.clone());
        ui.end_row();

        if let Some(zone) = chosen.filter(|z| *z != current) {
            self.apply(SyncEvent::ChangeZone { side, zone });
        }
        if let Some(text) = edited {
            self.apply(SyncEvent::EditWallClock { side, text });
        }
    }

    fn ui_meeting_line(&mut self, ui: &mut egui::Ui) {
        ui.heading("Meeting Line");
        ui.add_space(5.0);

        let line = MeetingLine::from_state(&self.state, &self.catalog, &self.converter);
        let rendered = match (line, &self.template) {
            (Some(line), Some(template)) => match template.render(&line) {
                Ok(text) => Some(text),
                Err(e) => {
                    error!("Failed to render meeting line: {}", e);
                    None
                }
            },
            _ => None,
        };

        match rendered {
            Some(text) => {
                ui.label(&text);
                if ui.button("📋 Copy to clipboard").clicked() {
                    ui.ctx().copy_text(text);
                    self.status_message = "Meeting line copied.".to_string();
                }
            }
            None => {
                ui.label(RichText::new("(Enter a valid date and time)").color(Color32::GRAY));
            }
        }
    }

    fn ui_live_clocks(&self, ui: &mut egui::Ui) {
        ui.heading("Live Clocks");
        ui.add_space(5.0);

        let zones = live::displayed_zones(&self.state, &self.extra_zones);
        let readings: Vec<LiveReading> = live::tick(&self.converter, &zones, Instant::now());
        egui::Grid::new("live_clock_grid")
            .num_columns(3)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for reading in readings {
                    ui.label(self.catalog.label_for(&reading.zone));
                    ui.label(RichText::new(format!("{} {}", reading.date, reading.time)).monospace());
                    ui.label(reading.abbreviation);
                    ui.end_row();
                }
            });
    }
}

impl eframe::App for MeetingClockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(message) = self.receiver.try_recv() {
            match message {
                Message::ConfigLoaded(Ok(startup)) => {
                    self.apply_startup(startup);
                    self.config_loaded = true;
                    self.status_message = "Configuration loaded.".to_string();
                }
                Message::ConfigLoaded(Err(e)) => {
                    error!("{}", e);
                    self.status_message = format!("ERROR loading config: {} (using defaults)", e);
                    self.config_loaded = true; // Mark attempt done
                }
            }
        }

        // Status bar at the bottom
        egui::TopBottomPanel::bottom("status_panel")
            .frame(egui::Frame::new().inner_margin(Margin::symmetric(10, 5)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if !self.config_loaded {
                        ui.add(egui::Spinner::new().size(14.0));
                        ui.add_space(5.0);
                    }
                    ui.label(&self.status_message);
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::new().inner_margin(Margin::same(15)))
            .show(ctx, |ui| {
                ui.heading("Meeting Clock");
                ui.separator();
                ui.add_space(10.0);

                egui::Grid::new("fields_grid")
                    .num_columns(3)
                    .spacing([10.0, 8.0])
                    .show(ui, |ui| {
                        self.ui_field_row(ui, Side::A);
                        self.ui_field_row(ui, Side::B);
                    });
                ui.label(
                    RichText::new(format!("Anchored on {:?}", self.state.anchor().side()))
                        .small()
                        .color(Color32::GRAY),
                );
                ui.add_space(15.0);

                self.ui_meeting_line(ui);
                ui.add_space(15.0);

                self.ui_live_clocks(ui);
            });

        // Live clocks tick once per second
        ctx.request_repaint_after(TICK);
    }
}
