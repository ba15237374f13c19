//! Tab strip materialization: the ordered service list becomes left tabs,
//! one flexible spacer, then right tabs.

use serde::Serialize;

use rambox_common::ServiceId;

use crate::model::{Align, Service};

/// What the chrome renders for a single tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabSpec {
    pub tab_id: String,
    pub service_id: ServiceId,
    pub title: String,
    pub url: String,
    pub logo: String,
    pub align: Align,
    pub enabled: bool,
}

impl TabSpec {
    fn from_service(service: &Service) -> Self {
        Self {
            tab_id: service.id.tab_id(),
            service_id: service.id,
            title: service.tab_title().to_string(),
            url: service.url.clone(),
            logo: service.logo.clone(),
            align: service.align,
            enabled: service.enabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "slot", rename_all = "lowercase")]
pub enum TabSlot {
    Tab(TabSpec),
    Spacer,
}

/// State of the tab strip.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(tag = "state", content = "slots", rename_all = "lowercase")]
pub enum TabStrip {
    /// Before the registry has been read. The chrome shows a spinner.
    #[default]
    Loading,
    /// No services. The chrome shows the empty-state placeholder.
    Empty,
    Tabs(Vec<TabSlot>),
}

impl TabStrip {
    pub fn materialize(services: &[Service]) -> Self {
        if services.is_empty() {
            return TabStrip::Empty;
        }

        let left = services.iter().filter(|s| s.align == Align::Left);
        let right = services.iter().filter(|s| s.align == Align::Right);

        let mut slots: Vec<TabSlot> = left
            .map(|s| TabSlot::Tab(TabSpec::from_service(s)))
            .collect();
        slots.push(TabSlot::Spacer);
        slots.extend(right.map(|s| TabSlot::Tab(TabSpec::from_service(s))));

        TabStrip::Tabs(slots)
    }

    pub fn tabs(&self) -> impl Iterator<Item = &TabSpec> {
        let slots: &[TabSlot] = match self {
            TabStrip::Tabs(slots) => slots,
            _ => &[],
        };
        slots.iter().filter_map(|slot| match slot {
            TabSlot::Tab(spec) => Some(spec),
            TabSlot::Spacer => None,
        })
    }

    pub fn spacer_index(&self) -> Option<usize> {
        match self {
            TabStrip::Tabs(slots) => slots.iter().position(|s| matches!(s, TabSlot::Spacer)),
            _ => None,
        }
    }

    pub fn shows_spinner(&self) -> bool {
        matches!(self, TabStrip::Loading)
    }

    pub fn shows_empty_placeholder(&self) -> bool {
        matches!(self, TabStrip::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewService;

    fn service(id: u32, name: &str, align: Align) -> Service {
        NewService::new("custom", name, format!("https://{id}.example/"))
            .align(align)
            .into_service(ServiceId(id))
    }

    #[test]
    fn single_left_custom_service_then_spacer() {
        let strip = TabStrip::materialize(&[service(1, "Intranet", Align::Left)]);
        match &strip {
            TabStrip::Tabs(slots) => {
                assert_eq!(slots.len(), 2);
                match &slots[0] {
                    TabSlot::Tab(spec) => assert_eq!(spec.tab_id, "tab_1"),
                    TabSlot::Spacer => panic!("expected tab first"),
                }
                assert_eq!(slots[1], TabSlot::Spacer);
            }
            other => panic!("expected tabs, got {other:?}"),
        }
        assert!(strip.tabs().all(|t| t.align == Align::Left));
    }

    #[test]
    fn left_tabs_precede_spacer_and_right_follow() {
        let services = vec![
            service(1, "A", Align::Left),
            service(2, "R1", Align::Right),
            service(3, "B", Align::Left),
            service(4, "R2", Align::Right),
        ];
        let strip = TabStrip::materialize(&services);
        let spacer = strip.spacer_index().unwrap();

        let TabStrip::Tabs(slots) = &strip else {
            panic!("expected tabs");
        };
        for (i, slot) in slots.iter().enumerate() {
            if let TabSlot::Tab(spec) = slot {
                match spec.align {
                    Align::Left => assert!(i < spacer),
                    Align::Right => assert!(i > spacer),
                }
            }
        }
        let order: Vec<_> = strip.tabs().map(|t| t.title.as_str()).collect();
        assert_eq!(order, vec!["A", "B", "R1", "R2"]);
    }

    #[test]
    fn only_right_tabs_still_get_leading_spacer() {
        let strip = TabStrip::materialize(&[service(5, "R", Align::Right)]);
        assert_eq!(strip.spacer_index(), Some(0));
    }

    #[test]
    fn empty_list_shows_placeholder_not_spinner() {
        let strip = TabStrip::materialize(&[]);
        assert!(strip.shows_empty_placeholder());
        assert!(!strip.shows_spinner());
        assert_eq!(strip.tabs().count(), 0);
    }

    #[test]
    fn default_is_loading() {
        let strip = TabStrip::default();
        assert!(strip.shows_spinner());
        assert!(!strip.shows_empty_placeholder());
    }

    #[test]
    fn disabled_service_keeps_its_tab() {
        let mut disabled = service(2, "Off", Align::Left);
        disabled.enabled = false;
        let strip = TabStrip::materialize(&[service(1, "On", Align::Left), disabled]);
        let tabs: Vec<_> = strip.tabs().collect();
        assert_eq!(tabs.len(), 2);
        assert!(!tabs[1].enabled);
    }

    #[test]
    fn hidden_name_gives_empty_title() {
        let mut s = service(1, "Secret", Align::Left);
        s.show_name_in_tab = false;
        let strip = TabStrip::materialize(&[s]);
        assert_eq!(strip.tabs().next().unwrap().title, "");
    }

    #[test]
    fn serializes_for_chrome() {
        let json = serde_json::to_value(TabStrip::materialize(&[service(
            1,
            "A",
            Align::Left,
        )]))
        .unwrap();
        assert_eq!(json["state"], "tabs");
        assert_eq!(json["slots"][0]["slot"], "tab");
        assert_eq!(json["slots"][0]["tab_id"], "tab_1");
        assert_eq!(json["slots"][0]["service_id"], 1);
        assert_eq!(json["slots"][1]["slot"], "spacer");

        let empty = serde_json::to_value(TabStrip::Empty).unwrap();
        assert_eq!(empty["state"], "empty");
    }
}
