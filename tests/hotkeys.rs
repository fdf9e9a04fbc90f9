use tapemeasure::data::hotkeys::*;

#[test]
fn tooltip_with_no_hotkey_returns_description_only() {
    assert_eq!(format_button_tooltip("Start", None), "Start");
}

#[test]
fn tooltip_with_ctrl_hotkey() {
    let hk = Hotkey::new(Modifier::Ctrl, 's');
    assert_eq!(format_button_tooltip("Save", Some(&hk)), "Save [Ctrl+S]");
}

#[test]
fn default_start_hotkey() {
    let hk = Hotkeys::default();
    let start = hk.get(HotkeyName::StartMeasurement).unwrap();
    assert_eq!(start.key, 'S');
    assert_eq!(start.modifier, Modifier::None);
}

#[test]
fn parse_and_display_agree() {
    for text in ["S", "Ctrl+S", "Alt+C", "Ctrl+Shift+M"] {
        let hk: Hotkey = text.parse().unwrap();
        assert_eq!(hk.to_string(), text);
    }
}

#[test]
fn yaml_with_disabled_binding() {
    let hk: Hotkeys = serde_yaml::from_str("next_camera: null\n").unwrap();
    assert!(hk.next_camera.is_none());
    assert_eq!(hk.start_measurement, Hotkeys::default().start_measurement);
}
