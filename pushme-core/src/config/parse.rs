//! Board file parser
//!
//! A minimal line-oriented TOML parser covering the subset used by board
//! files. It runs on the target without an allocator.
//!
//! Supported:
//! - `[board]`, `[button NAME]`, `[led NAME]` (also `[button.NAME]`)
//! - Key = value pairs (string, integer, boolean)
//! - Comments (`# ...`), including trailing comments
//!
//! Pin strings are `gpioN` with optional modifiers:
//! - `^gpioN` selects the built-in pull-up (buttons only)
//! - `!gpioN` inverts the button polarity to active-high (pull-down wiring)

use heapless::String as HString;
use pushme_hal::PinId;

use super::types::{BoardConfig, ButtonConfig, LedConfig, GPIO_COUNT, MAX_LABEL_LEN};
use crate::input::ButtonMode;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Malformed pin string
    InvalidPin,
    /// Device section without a `pin` key
    MissingPin,
    /// Too many devices (exceeded heapless capacity)
    TooManyItems,
    /// Two devices share a name
    DuplicateName,
    /// Two devices share a pin
    DuplicatePin,
    /// LED bound to a button that is not declared
    UnknownButton,
}

/// Pin string with its modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PinSpec {
    pin: PinId,
    pull_up: bool,
    inverted: bool,
}

#[derive(Debug, Clone)]
enum Section {
    Root,
    Board,
    Button(HString<MAX_LABEL_LEN>),
    Led(HString<MAX_LABEL_LEN>),
}

/// Button section being built
#[derive(Debug, Default)]
struct ButtonDraft {
    config: ButtonConfig,
    pin: Option<PinSpec>,
    mode: Option<ButtonMode>,
}

/// LED section being built
#[derive(Debug, Default)]
struct LedDraft {
    config: LedConfig,
    pin: Option<PinId>,
}

/// Parse a board file into a [`BoardConfig`]
pub fn parse_board(input: &str) -> Result<BoardConfig, ParseError> {
    let mut config = BoardConfig::new();
    let mut section = Section::Root;
    let mut button: Option<ButtonDraft> = None;
    let mut led: Option<LedDraft> = None;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            save_section(&mut config, &mut button, &mut led)?;

            section = parse_section_header(&line[1..line.len() - 1])?;
            match &section {
                Section::Button(name) => {
                    let mut draft = ButtonDraft::default();
                    draft.config.name = name.clone();
                    button = Some(draft);
                }
                Section::Led(name) => {
                    let mut draft = LedDraft::default();
                    draft.config.name = name.clone();
                    led = Some(draft);
                }
                Section::Board | Section::Root => {}
            }
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(&section, key, value, &mut config, &mut button, &mut led)?;
    }

    save_section(&mut config, &mut button, &mut led)?;
    check_bindings(&config)?;

    Ok(config)
}

/// Parse a section header like "button start", "button.start" or "board"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    let header = header.trim();

    let (kind, name) = match header.split_once('.') {
        Some((kind, name)) => (kind.trim(), Some(name.trim())),
        None => {
            let mut parts = header.split_whitespace();
            let kind = parts.next().ok_or(ParseError::InvalidSection)?;
            let name = parts.next();
            if parts.next().is_some() {
                return Err(ParseError::InvalidSection);
            }
            (kind, name)
        }
    };

    let label = |name: Option<&str>| -> Result<HString<MAX_LABEL_LEN>, ParseError> {
        let name = name
            .filter(|n| is_valid_name(n))
            .ok_or(ParseError::InvalidSection)?;
        HString::try_from(name).map_err(|_| ParseError::InvalidSection)
    };

    match kind {
        "board" if name.is_none() => Ok(Section::Board),
        "button" => Ok(Section::Button(label(name)?)),
        "led" => Ok(Section::Led(label(name)?)),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Device names are non-empty runs of ASCII letters, digits, `_` and `-`
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    // Drop trailing comments unless the # sits inside a string
    let value = match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Strip surrounding quotes if present
fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse an output level: `true`/`false` or a raw integer
fn parse_level(value: &str) -> Result<u8, ParseError> {
    match value {
        "true" => Ok(1),
        "false" => Ok(0),
        _ => parse_int(value),
    }
}

fn parse_label(value: &str) -> Result<HString<MAX_LABEL_LEN>, ParseError> {
    let name = parse_string(value);
    if !is_valid_name(name) {
        return Err(ParseError::InvalidValue);
    }
    HString::try_from(name).map_err(|_| ParseError::InvalidValue)
}

/// Parse a pin string like "gpio11", "^gpio4" or "!gpio5"
fn parse_pin(value: &str) -> Result<PinSpec, ParseError> {
    let mut s = parse_string(value);
    let mut pull_up = false;
    let mut inverted = false;

    loop {
        if let Some(rest) = s.strip_prefix('^') {
            pull_up = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('!') {
            inverted = true;
            s = rest;
        } else {
            break;
        }
    }

    // An internal pull-up on an active-high button would hold it pressed
    if pull_up && inverted {
        return Err(ParseError::InvalidPin);
    }

    let num = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    let pin: PinId = num.parse().map_err(|_| ParseError::InvalidPin)?;
    if pin >= GPIO_COUNT {
        return Err(ParseError::InvalidPin);
    }

    Ok(PinSpec {
        pin,
        pull_up,
        inverted,
    })
}

fn parse_button_mode(value: &str) -> Result<ButtonMode, ParseError> {
    match parse_string(value) {
        "pullup" => Ok(ButtonMode::PulledUp),
        "builtin_pullup" => Ok(ButtonMode::BuiltinPulledUp),
        "pulldown" => Ok(ButtonMode::PulledDown),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Wiring implied by the pin modifiers
fn mode_from_pin(spec: PinSpec) -> Result<ButtonMode, ParseError> {
    match (spec.pull_up, spec.inverted) {
        (false, false) => Ok(ButtonMode::PulledUp),
        (true, false) => Ok(ButtonMode::BuiltinPulledUp),
        (false, true) => Ok(ButtonMode::PulledDown),
        (true, true) => Err(ParseError::InvalidPin),
    }
}

fn apply_value(
    section: &Section,
    key: &str,
    value: &str,
    config: &mut BoardConfig,
    button: &mut Option<ButtonDraft>,
    led: &mut Option<LedDraft>,
) -> Result<(), ParseError> {
    match section {
        Section::Board => match key {
            "poll_interval_ms" => {
                let ms: u32 = parse_int(value)?;
                if ms == 0 {
                    return Err(ParseError::InvalidValue);
                }
                config.poll_interval_ms = ms;
            }
            "long_press_ms" => config.long_press_ms = parse_int(value)?,
            _ => {} // Ignore unknown keys
        },
        Section::Button(_) => {
            let b = button.as_mut().ok_or(ParseError::InvalidSection)?;
            match key {
                "pin" => b.pin = Some(parse_pin(value)?),
                "mode" => b.mode = Some(parse_button_mode(value)?),
                _ => {}
            }
        }
        Section::Led(_) => {
            let l = led.as_mut().ok_or(ParseError::InvalidSection)?;
            match key {
                "pin" => {
                    let spec = parse_pin(value)?;
                    if spec.pull_up || spec.inverted {
                        return Err(ParseError::InvalidPin);
                    }
                    l.pin = Some(spec.pin);
                }
                "initial" => l.config.initial = parse_level(value)?,
                "button" => l.config.button = Some(parse_label(value)?),
                _ => {}
            }
        }
        Section::Root => {}
    }

    Ok(())
}

/// Move the section being built into the config
fn save_section(
    config: &mut BoardConfig,
    button: &mut Option<ButtonDraft>,
    led: &mut Option<LedDraft>,
) -> Result<(), ParseError> {
    if let Some(draft) = button.take() {
        let spec = draft.pin.ok_or(ParseError::MissingPin)?;
        let mut b = draft.config;
        b.pin = spec.pin;
        b.mode = match draft.mode {
            Some(mode) => mode,
            None => mode_from_pin(spec)?,
        };

        if config.find_button(&b.name).is_some() {
            return Err(ParseError::DuplicateName);
        }
        if config.pin_in_use(b.pin) {
            return Err(ParseError::DuplicatePin);
        }
        config
            .buttons
            .push(b)
            .map_err(|_| ParseError::TooManyItems)?;
    }

    if let Some(draft) = led.take() {
        let mut l = draft.config;
        l.pin = draft.pin.ok_or(ParseError::MissingPin)?;

        if config.find_led(&l.name).is_some() {
            return Err(ParseError::DuplicateName);
        }
        if config.pin_in_use(l.pin) {
            return Err(ParseError::DuplicatePin);
        }
        config.leds.push(l).map_err(|_| ParseError::TooManyItems)?;
    }

    Ok(())
}

/// Every LED binding must name a declared button
fn check_bindings(config: &BoardConfig) -> Result<(), ParseError> {
    for led in &config.leds {
        if let Some(name) = &led.button {
            if config.find_button(name).is_none() {
                return Err(ParseError::UnknownButton);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pin() {
        let pin = parse_pin("gpio11").unwrap();
        assert_eq!(pin.pin, 11);
        assert!(!pin.pull_up);
        assert!(!pin.inverted);

        let pin = parse_pin("\"^gpio4\"").unwrap();
        assert_eq!(pin.pin, 4);
        assert!(pin.pull_up);

        let pin = parse_pin("!gpio5").unwrap();
        assert!(pin.inverted);

        assert_eq!(parse_pin("pin11"), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("gpio"), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("gpio300"), Err(ParseError::InvalidPin));
    }

    #[test]
    fn test_parse_pin_range() {
        assert_eq!(parse_pin("gpio29").map(|p| p.pin), Ok(29));
        assert_eq!(parse_pin("gpio30"), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("gpio200"), Err(ParseError::InvalidPin));
        assert_eq!(
            parse_board("[button a]\npin = \"gpio200\"\n"),
            Err(ParseError::InvalidPin)
        );
    }

    #[test]
    fn test_parse_pin_conflicting_modifiers() {
        assert_eq!(parse_pin("^!gpio2"), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("!^gpio2"), Err(ParseError::InvalidPin));
        // An explicit mode does not make the pin string valid
        assert_eq!(
            parse_board("[button a]\npin = \"!^gpio2\"\nmode = \"pulldown\"\n"),
            Err(ParseError::InvalidPin)
        );
    }

    #[test]
    fn test_parse_section_header() {
        match parse_section_header("button start").unwrap() {
            Section::Button(name) => assert_eq!(name.as_str(), "start"),
            _ => panic!("Wrong section type"),
        }

        match parse_section_header("led.status").unwrap() {
            Section::Led(name) => assert_eq!(name.as_str(), "status"),
            _ => panic!("Wrong section type"),
        }

        assert!(matches!(parse_section_header("board"), Ok(Section::Board)));
        assert!(parse_section_header("button").is_err());
        assert!(parse_section_header("stepper spin").is_err());
        assert!(parse_section_header("button a b").is_err());
        assert!(parse_section_header("button.a.b").is_err());
        assert!(parse_section_header("led.").is_err());
        assert!(parse_section_header("button.\"a\"").is_err());
        assert!(parse_section_header("button.abcdefghijklmnopq").is_err());
        assert!(parse_section_header("button.start-2_b").is_ok());
    }

    #[test]
    fn test_led_binding_must_be_a_name() {
        assert_eq!(
            parse_board("[button a]\npin = \"gpio1\"\n[led b]\npin = \"gpio2\"\nbutton = \"a.b\"\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_parse_key_value_comments() {
        assert_eq!(parse_key_value("pin = \"gpio3\" # start"), Some(("pin", "\"gpio3\"")));
        assert_eq!(parse_key_value("button = \"a#b\""), Some(("button", "\"a#b\"")));
        assert_eq!(parse_key_value("pin ="), None);
    }

    #[test]
    fn test_parse_full_board() {
        let input = r#"
# Demo board
[board]
poll_interval_ms = 5
long_press_ms = 1000

[button start]
pin = "^gpio14"

[button stop]
pin = "gpio15"
mode = "pulldown"

[button.reset]
pin = "!gpio16"

[led status]
pin = "gpio25"
initial = 1
button = "start"

[led error]
pin = "gpio24"
"#;

        let config = parse_board(input).unwrap();
        assert_eq!(config.poll_interval_ms, 5);
        assert_eq!(config.long_press_ms, 1000);

        assert_eq!(config.buttons.len(), 3);
        assert_eq!(config.buttons[0].name.as_str(), "start");
        assert_eq!(config.buttons[0].pin, 14);
        assert_eq!(config.buttons[0].mode, ButtonMode::BuiltinPulledUp);
        assert_eq!(config.buttons[1].mode, ButtonMode::PulledDown);
        assert_eq!(config.buttons[2].mode, ButtonMode::PulledDown);

        assert_eq!(config.leds.len(), 2);
        assert_eq!(config.leds[0].initial, 1);
        assert_eq!(config.leds[0].button.as_deref(), Some("start"));
        assert_eq!(config.leds[1].initial, 0);
        assert!(config.leds[1].button.is_none());
    }

    #[test]
    fn test_plain_pin_defaults_to_external_pullup() {
        let config = parse_board("[button a]\npin = \"gpio2\"\n").unwrap();
        assert_eq!(config.buttons[0].mode, ButtonMode::PulledUp);
    }

    #[test]
    fn test_explicit_mode_overrides_prefix() {
        let config = parse_board("[button a]\npin = \"^gpio2\"\nmode = \"pullup\"\n").unwrap();
        assert_eq!(config.buttons[0].mode, ButtonMode::PulledUp);
    }

    #[test]
    fn test_led_initial_accepts_any_raw_level() {
        let config = parse_board("[led a]\npin = \"gpio2\"\ninitial = 7\n").unwrap();
        assert_eq!(config.leds[0].initial, 7);

        let config = parse_board("[led a]\npin = \"gpio2\"\ninitial = true\n").unwrap();
        assert_eq!(config.leds[0].initial, 1);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_board("[button a]\nmode = \"pullup\"\n"),
            Err(ParseError::MissingPin)
        );
        assert_eq!(
            parse_board("[button a]\npin = \"^!gpio2\"\n"),
            Err(ParseError::InvalidPin)
        );
        assert_eq!(
            parse_board("[led a]\npin = \"^gpio2\"\n"),
            Err(ParseError::InvalidPin)
        );
        assert_eq!(
            parse_board("[button a]\npin = \"gpio2\"\n[led b]\npin = \"gpio2\"\n"),
            Err(ParseError::DuplicatePin)
        );
        assert_eq!(
            parse_board("[button a]\npin = \"gpio2\"\n[button a]\npin = \"gpio3\"\n"),
            Err(ParseError::DuplicateName)
        );
        assert_eq!(
            parse_board("[led a]\npin = \"gpio2\"\nbutton = \"nope\"\n"),
            Err(ParseError::UnknownButton)
        );
        assert_eq!(
            parse_board("[board]\npoll_interval_ms = 0\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_board("[button a]\npin = \"gpio2\"\nmode = \"floating\"\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(parse_board("[heater x]\n"), Err(ParseError::InvalidSection));
        assert_eq!(parse_board("just some words\n"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_too_many_buttons() {
        let mut input: heapless::String<512> = heapless::String::new();
        for i in 0..9u8 {
            core::fmt::Write::write_fmt(
                &mut input,
                format_args!("[button b{}]\npin = \"gpio{}\"\n", i, i),
            )
            .unwrap();
        }
        assert_eq!(parse_board(&input), Err(ParseError::TooManyItems));
    }

    mod props {
        use super::super::{parse_board, parse_pin, ParseError};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_parser_never_panics(input in "\\PC*") {
                let _ = parse_board(&input);
            }

            #[test]
            fn prop_line_noise_in_sections(lines in prop::collection::vec("[a-z_]{1,8} = [a-z0-9\"^!]{0,10}", 0..12)) {
                let mut input: heapless::String<512> = heapless::String::new();
                input.push_str("[board]\n").unwrap();
                for line in &lines {
                    input.push_str(line).unwrap();
                    input.push('\n').unwrap();
                }
                // Unknown keys and bad values may fail, but never with a section error
                prop_assert_ne!(parse_board(&input).err(), Some(ParseError::InvalidSection));
            }

            #[test]
            fn prop_any_gpio_number(pin in 0u8..30, pull_up in any::<bool>()) {
                let mut s: heapless::String<16> = heapless::String::new();
                core::fmt::Write::write_fmt(
                    &mut s,
                    format_args!("{}gpio{}", if pull_up { "^" } else { "" }, pin),
                )
                .unwrap();
                let spec = parse_pin(&s).unwrap();
                prop_assert_eq!(spec.pin, pin);
                prop_assert_eq!(spec.pull_up, pull_up);
            }

            #[test]
            fn prop_out_of_range_gpio_rejected(pin in 30u8..) {
                let mut s: heapless::String<16> = heapless::String::new();
                core::fmt::Write::write_fmt(&mut s, format_args!("gpio{}", pin)).unwrap();
                prop_assert_eq!(parse_pin(&s), Err(ParseError::InvalidPin));
            }
        }
    }
}
