//! Build script for pushme-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time

use std::collections::HashSet;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Number of user GPIOs on the RP2040
const GPIO_COUNT: u64 = 30;

/// Capacity limits of the on-board parser
const MAX_LABEL_LEN: usize = 16;
const MAX_BUTTONS: usize = 8;
const MAX_LEDS: usize = 8;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

/// Validate board.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read board.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in board.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    let mut pins = HashSet::new();

    if let Some(table) = config.as_table() {
        for key in table.keys() {
            if !["board", "button", "led"].contains(&key.as_str()) {
                errors.push(format!("Unknown section [{}]", key));
            }
        }
    }

    let buttons = device_table(&config, "button", &mut errors);
    if buttons.is_empty() {
        errors.push("Missing [button.*] section - at least one button is required".to_string());
    }
    if buttons.len() > MAX_BUTTONS {
        errors.push(format!("Too many buttons ({}, max {})", buttons.len(), MAX_BUTTONS));
    }

    for (name, button) in &buttons {
        let section = format!("[button.{}]", name);
        check_name(&section, name, &mut errors);
        match button.get("pin").and_then(|v| v.as_str()) {
            Some(pin) => check_pin(&section, pin, "^!", &mut pins, &mut errors),
            None => errors.push(format!("{} missing 'pin'", section)),
        }
        if let Some(mode) = button.get("mode") {
            let valid = mode
                .as_str()
                .is_some_and(|m| ["pullup", "builtin_pullup", "pulldown"].contains(&m));
            if !valid {
                errors.push(format!(
                    "{} mode must be 'pullup', 'builtin_pullup' or 'pulldown'",
                    section
                ));
            }
        }
    }

    let leds = device_table(&config, "led", &mut errors);
    if leds.len() > MAX_LEDS {
        errors.push(format!("Too many LEDs ({}, max {})", leds.len(), MAX_LEDS));
    }

    for (name, led) in &leds {
        let section = format!("[led.{}]", name);
        check_name(&section, name, &mut errors);
        match led.get("pin").and_then(|v| v.as_str()) {
            Some(pin) => check_pin(&section, pin, "", &mut pins, &mut errors),
            None => errors.push(format!("{} missing 'pin'", section)),
        }
        match led.get("initial") {
            None | Some(toml::Value::Boolean(_)) => {}
            Some(toml::Value::Integer(level)) if (0..=255).contains(level) => {}
            Some(_) => errors.push(format!("{} initial must be a boolean or 0-255", section)),
        }
        if let Some(button) = led.get("button") {
            let known = button
                .as_str()
                .is_some_and(|b| buttons.iter().any(|(n, _)| n == b));
            if !known {
                errors.push(format!("{} references unknown button {}", section, button));
            }
        }
    }

    if let Some(board) = config.get("board") {
        if let Some(interval) = board.get("poll_interval_ms") {
            if !matches!(interval.as_integer(), Some(ms) if ms > 0 && ms <= u32::MAX as i64) {
                errors.push("[board] poll_interval_ms must be a positive 32-bit integer".to_string());
            }
        }
        if let Some(threshold) = board.get("long_press_ms") {
            if !matches!(threshold.as_integer(), Some(ms) if (0..=u32::MAX as i64).contains(&ms)) {
                errors.push("[board] long_press_ms must be a 32-bit integer".to_string());
            }
        }
    }

    if !errors.is_empty() {
        fail("Invalid board configuration", &errors);
    }

    println!("cargo:warning=board.toml validated successfully");
}

/// Collect the `[kind.NAME]` sections
fn device_table(
    config: &toml::Value,
    kind: &str,
    errors: &mut Vec<String>,
) -> Vec<(String, toml::value::Table)> {
    let devices = match config.get(kind) {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push(format!("[{}] must contain named [{}.NAME] tables", kind, kind));
            return Vec::new();
        }
        None => return Vec::new(),
    };

    let mut out = Vec::new();
    for (name, device) in devices {
        match device {
            toml::Value::Table(t) => out.push((name.clone(), t.clone())),
            _ => errors.push(format!("[{}.{}] must be a table", kind, name)),
        }
    }
    out
}

/// Device names: 1-16 ASCII letters, digits, '_' or '-'
fn check_name(section: &str, name: &str, errors: &mut Vec<String>) {
    let valid_chars = name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if name.is_empty() || !valid_chars {
        errors.push(format!("{} name may only use letters, digits, '_' and '-'", section));
    }
    if name.len() > MAX_LABEL_LEN {
        errors.push(format!("{} name longer than {} characters", section, MAX_LABEL_LEN));
    }
}

/// Check a pin string and record it for duplicate detection
fn check_pin(
    section: &str,
    pin: &str,
    modifiers: &str,
    used: &mut HashSet<u64>,
    errors: &mut Vec<String>,
) {
    let bare = pin.trim_start_matches(|c| modifiers.contains(c));
    let prefix = &pin[..pin.len() - bare.len()];
    if prefix.contains('^') && prefix.contains('!') {
        errors.push(format!("{} cannot combine '^' and '!' on {}", section, pin));
    }

    match bare.strip_prefix("gpio").and_then(|n| n.parse::<u64>().ok()) {
        Some(num) if num < GPIO_COUNT => {
            if !used.insert(num) {
                errors.push(format!("{} gpio{} is already used by another device", section, num));
            }
        }
        Some(num) => errors.push(format!("{} gpio{} out of range (0-29)", section, num)),
        None => errors.push(format!("{} invalid pin '{}'", section, pin)),
    }
}

/// Abort the build with a framed error message
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<57}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|e| {
                let e = if e.len() > 62 { format!("{}...", &e[..59]) } else { e.clone() };
                format!("║  • {:<62} ║", e)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}
