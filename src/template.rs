use crate::catalog::ZoneCatalog;
use crate::clock::{zone_abbreviation, Side, SyncState, WallClockConverter, ZoneFormatter};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tera::{Context, Error as TeraError, Tera}; // Templating engine
use thiserror::Error;

/// Built-in meeting line, used when no template is configured.
pub const DEFAULT_MEETING_TEMPLATE: &str =
    "Proposed time: {{ a.when }} {{ a.abbreviation }} / {{ b.when }} {{ b.abbreviation }}";

const WHEN_FORMAT: &str = "%A, %b %-d at %-I:%M %p";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to read template file '{path}': {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse template '{name}': {source}")]
    ParseError { name: String, source: TeraError },
    #[error("Failed to render template: {0}")]
    RenderError(#[from] TeraError),
}

/// One side of a meeting line.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MeetingSide {
    /// Catalog label, e.g. "New York"
    pub label: String,
    pub zone: String,
    /// "2024-03-01T10:00"
    pub wall_clock: String,
    /// "Friday, Mar 1 at 10:00 AM"
    pub when: String,
    pub abbreviation: String,
}

/// Both fields of the time tools, ready for rendering.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MeetingLine {
    pub a: MeetingSide,
    pub b: MeetingSide,
}

impl MeetingLine {
    /// `None` unless both fields hold a valid reading.
    pub fn from_state<F: ZoneFormatter>(
        state: &SyncState,
        catalog: &ZoneCatalog,
        converter: &WallClockConverter<F>,
    ) -> Option<Self> {
        let anchored = state.field(state.anchor().side());
        let instant = converter
            .resolve_instant(&anchored.wall_clock()?, &anchored.zone)
            .ok()?;

        let side = |side: Side| -> Option<MeetingSide> {
            let field = state.field(side);
            let wc = field.wall_clock()?;
            Some(MeetingSide {
                label: catalog.label_for(&field.zone).to_string(),
                zone: field.zone.to_string(),
                wall_clock: wc.to_string(),
                when: wc.as_naive().format(WHEN_FORMAT).to_string(),
                abbreviation: zone_abbreviation(converter.formatter(), instant, &field.zone),
            })
        };

        Some(Self {
            a: side(Side::A)?,
            b: side(Side::B)?,
        })
    }
}

pub struct MeetingTemplate {
    pub template_text: String,
    tera: Tera,
    template_name: String,
}

impl MeetingTemplate {
    /// Loads the meeting line template from a file; the whole file is the template.
    pub fn load(template_path: &Path) -> Result<Self, TemplateError> {
        let path_str = template_path.to_string_lossy().to_string();
        let content = fs::read_to_string(template_path).map_err(|e| TemplateError::ReadError {
            path: path_str.clone(),
            source: e,
        })?;

        Self::from_content(content.trim_end(), "file_template")
    }

    pub fn from_content(content: &str, name: &str) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.add_raw_template(name, content)
            .map_err(|e| TemplateError::ParseError {
                name: name.to_string(),
                source: e,
            })?;

        Ok(MeetingTemplate {
            template_text: content.to_string(),
            tera,
            template_name: name.to_string(),
        })
    }

    /// The built-in [`DEFAULT_MEETING_TEMPLATE`].
    pub fn builtin() -> Result<Self, TemplateError> {
        Self::from_content(DEFAULT_MEETING_TEMPLATE, "default")
    }

    pub fn render(&self, line: &MeetingLine) -> Result<String, TemplateError> {
        let mut context = Context::new();
        context.insert("a", &line.a);
        context.insert("b", &line.b);

        Ok(self.tera.render(&self.template_name, &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Instant, SyncEvent, TzFormatter};
    use chrono::{TimeZone, Utc};

    fn state(converter: &WallClockConverter<TzFormatter>) -> SyncState {
        let now = Instant::from(Utc.with_ymd_and_hms(2024, 3, 1, 14, 20, 0).single().unwrap());
        SyncState::initial("America/New_York".into(), "Europe/London".into(), now, converter)
    }

    #[test]
    fn renders_default_line() {
        let catalog = ZoneCatalog::default();
        let converter = WallClockConverter::new(catalog.formatter());
        let line = MeetingLine::from_state(&state(&converter), &catalog, &converter).unwrap();

        assert_eq!(line.a.label, "New York");
        assert_eq!(line.b.wall_clock, "2024-03-01T15:00");

        let text = MeetingTemplate::builtin().unwrap().render(&line).unwrap();
        assert_eq!(
            text,
            "Proposed time: Friday, Mar 1 at 10:00 AM EST (GMT-5) / Friday, Mar 1 at 3:00 PM GMT"
        );
    }

    #[test]
    fn custom_template_sees_both_sides() {
        let catalog = ZoneCatalog::default();
        let converter = WallClockConverter::new(catalog.formatter());
        let line = MeetingLine::from_state(&state(&converter), &catalog, &converter).unwrap();

        let template =
            MeetingTemplate::from_content("{{ a.label }} {{ a.wall_clock }} = {{ b.label }} {{ b.wall_clock }}", "custom")
                .unwrap();
        assert_eq!(
            template.render(&line).unwrap(),
            "New York 2024-03-01T10:00 = London 2024-03-01T15:00"
        );
    }

    #[test]
    fn incomplete_state_has_no_line() {
        let catalog = ZoneCatalog::default();
        let converter = WallClockConverter::new(catalog.formatter());
        let cleared = state(&converter).apply(
            SyncEvent::EditWallClock {
                side: Side::A,
                text: String::new(),
            },
            &converter,
        );
        assert!(MeetingLine::from_state(&cleared, &catalog, &converter).is_none());
    }

    #[test]
    fn bad_template_is_a_parse_error() {
        let err = MeetingTemplate::from_content("{{ a.when", "broken").err().unwrap();
        assert!(matches!(err, TemplateError::ParseError { ref name, .. } if name == "broken"));
    }

    #[test]
    fn loads_template_from_file() {
        let path = std::env::temp_dir().join(format!("meeting-clock-{}.tera", std::process::id()));
        fs::write(&path, "At {{ b.when }}\n").unwrap();
        let template = MeetingTemplate::load(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(template.template_text, "At {{ b.when }}");

        let missing = MeetingTemplate::load(Path::new("/nonexistent/meeting.tera"));
        assert!(matches!(missing, Err(TemplateError::ReadError { .. })));
    }
}
