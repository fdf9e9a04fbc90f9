//! Keyboard shortcuts for the tape measure window.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use eframe::egui;

use crate::error::{ConfigError, ConfigResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    None,
    Ctrl,
    Alt,
    Shift,
    CtrlShift,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modifier::None => "",
            Modifier::Ctrl => "Ctrl",
            Modifier::Alt => "Alt",
            Modifier::Shift => "Shift",
            Modifier::CtrlShift => "Ctrl+Shift",
        };
        write!(f, "{}", s)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotkey {
    pub modifier: Modifier,
    pub key: char,
}

impl Hotkey {
    pub fn new(modifier: Modifier, key: char) -> Self {
        Self {
            modifier,
            key: key.to_ascii_uppercase(),
        }
    }

    fn egui_key(&self) -> Option<egui::Key> {
        if self.key == ' ' {
            return Some(egui::Key::Space);
        }
        egui::Key::from_name(&self.key.to_string())
    }

    /// True if this hotkey was pressed during the current frame.
    pub fn pressed(&self, input: &egui::InputState) -> bool {
        let Some(key) = self.egui_key() else {
            return false;
        };
        modifiers_match(&input.modifiers, self.modifier) && input.key_pressed(key)
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.key {
            ' ' => "Space".to_string(),
            other => other.to_string(),
        };
        if self.modifier == Modifier::None {
            write!(f, "{}", key)
        } else {
            write!(f, "{}+{}", self.modifier, key)
        }
    }
}

impl FromStr for Hotkey {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty hotkey".to_string());
        }
        let parts: Vec<&str> = s.split('+').map(|p| p.trim()).collect();
        let (last, mods) = match parts.split_last() {
            Some(split) => split,
            None => return Err("invalid hotkey".to_string()),
        };
        let ch = if last.eq_ignore_ascii_case("space") {
            ' '
        } else {
            let mut chars = last.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                (None, _) => return Err("no key char".to_string()),
                (Some(_), Some(_)) => return Err(format!("key must be one character: '{last}'")),
            }
        };
        let mut lowers: Vec<String> = mods.iter().map(|m| m.to_lowercase()).collect();
        lowers.sort();
        let modifier = match lowers.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
            [] => Modifier::None,
            ["ctrl"] | ["control"] => Modifier::Ctrl,
            ["alt"] => Modifier::Alt,
            ["shift"] => Modifier::Shift,
            ["ctrl", "shift"] | ["control", "shift"] => Modifier::CtrlShift,
            _ => return Err(format!("unknown modifier combo '{:?}'", mods)),
        };
        Ok(Hotkey::new(modifier, ch))
    }
}

fn modifiers_match(mods: &egui::Modifiers, modifier: Modifier) -> bool {
    let ctrl = mods.ctrl || mods.command;
    let alt = mods.alt;
    let shift = mods.shift;
    match modifier {
        Modifier::None => !ctrl && !alt && !shift,
        Modifier::Ctrl => ctrl && !alt && !shift,
        Modifier::Alt => alt && !ctrl,
        Modifier::Shift => shift && !ctrl && !alt,
        Modifier::CtrlShift => ctrl && shift && !alt,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotkeys {
    pub start_measurement: Option<Hotkey>,
    pub next_camera: Option<Hotkey>,
    pub save_settings: Option<Hotkey>,
}

impl Default for Hotkeys {
    fn default() -> Self {
        Self {
            start_measurement: Some(Hotkey::new(Modifier::None, 'S')),
            next_camera: Some(Hotkey::new(Modifier::None, 'C')),
            save_settings: Some(Hotkey::new(Modifier::Ctrl, 'S')),
        }
    }
}

fn default_hotkeys_path() -> ConfigResult<PathBuf> {
    let home = std::env::var_os("HOME").ok_or(ConfigError::NoHome)?;
    Ok(PathBuf::from(home).join(".tapemeasure").join("hotkeys.yaml"))
}

impl Hotkeys {
    pub fn get(&self, name: HotkeyName) -> Option<&Hotkey> {
        match name {
            HotkeyName::StartMeasurement => self.start_measurement.as_ref(),
            HotkeyName::NextCamera => self.next_camera.as_ref(),
            HotkeyName::SaveSettings => self.save_settings.as_ref(),
        }
    }

    /// Save hotkeys to `~/.tapemeasure/hotkeys.yaml`.
    pub fn save_to_default_path(&self) -> ConfigResult<PathBuf> {
        let path = default_hotkeys_path()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, serde_yaml::to_string(self)?)?;
        Ok(path)
    }

    /// Load hotkeys from `~/.tapemeasure/hotkeys.yaml`; `Ok(None)` if the file is absent.
    pub fn load_from_default_path() -> ConfigResult<Option<Hotkeys>> {
        let path = default_hotkeys_path()?;
        if !path.exists() {
            return Ok(None);
        }
        let s = fs::read_to_string(&path)?;
        Ok(Some(serde_yaml::from_str(&s)?))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HotkeyName {
    StartMeasurement,
    NextCamera,
    SaveSettings,
}

impl HotkeyName {
    pub const ALL: [HotkeyName; 3] = [
        HotkeyName::StartMeasurement,
        HotkeyName::NextCamera,
        HotkeyName::SaveSettings,
    ];
}

/// Collect the actions whose hotkeys fired this frame.
///
/// Nothing fires while a text field has keyboard focus.
pub fn detect_hotkey_actions(cfg: &Hotkeys, ctx: &egui::Context) -> Vec<HotkeyName> {
    if ctx.wants_keyboard_input() {
        return Vec::new();
    }
    ctx.input(|input| {
        HotkeyName::ALL
            .into_iter()
            .filter(|name| cfg.get(*name).is_some_and(|hk| hk.pressed(input)))
            .collect()
    })
}

/// Append the hotkey (if any) to a button tooltip.
pub fn format_button_tooltip(description: &str, hotkey: Option<&Hotkey>) -> String {
    match hotkey {
        Some(hk) => format!("{} [{}]", description, hk),
        None => description.to_string(),
    }
}
