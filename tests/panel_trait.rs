use mdplot::panels::*;

fn collapsed_label_for(p: &impl Panel) -> String {
    p.icon_only()
        .map(|s| s.to_string())
        .unwrap_or_else(|| p.title().to_string())
}

#[test]
fn panel_titles() {
    assert_eq!(SamplesPanel::default().title(), "Samples");
    assert_eq!(StylesPanel::default().title(), "Styles");
    assert_eq!(ExportPanel::default().title(), "Export");
}

#[test]
fn samples_panel_starts_open() {
    assert!(SamplesPanel::default().state().visible);
    assert!(!StylesPanel::default().state().visible);
}

#[test]
fn collapsed_label_uses_icon_when_available() {
    let p = StylesPanel::default();
    let label = collapsed_label_for(&p);
    assert_eq!(label, p.icon_only().unwrap().to_string());
    assert!(!label.contains(p.title()));
}

#[test]
fn full_label_contains_both_icon_and_title() {
    let p = ExportPanel::default();
    let label = p.title_and_icon();
    assert!(label.contains(p.title()));
    assert!(label.contains(p.icon_only().unwrap()));
}
