//! Static region and threat catalogs.
//!
//! Both catalogs are immutable data built once at startup and injected into
//! the pipeline; there is no global mutable state. Region name resolution
//! uses an explicit alias table of known historical spellings instead of
//! runtime pattern guessing, so normalization stays deterministic.

use std::collections::HashMap;

/// One first-level administrative division.
#[derive(Debug, Clone, Copy)]
pub struct RegionInfo {
    /// Canonical Ukrainian name, the true identity of a region.
    pub name: &'static str,
    /// English display name.
    pub name_en: &'static str,
    /// OpenStreetMap relation id used for boundary downloads.
    pub osm_id: u64,
}

/// All 27 regions: 24 oblasts, Kyiv City, Sevastopol, and Crimea.
static REGIONS: [RegionInfo; 27] = [
    RegionInfo { name: "Вінницька область", name_en: "Vinnytsia", osm_id: 90726 },
    RegionInfo { name: "Волинська область", name_en: "Volyn", osm_id: 71064 },
    RegionInfo { name: "Дніпропетровська область", name_en: "Dnipropetrovsk", osm_id: 101746 },
    RegionInfo { name: "Донецька область", name_en: "Donetsk", osm_id: 71973 },
    RegionInfo { name: "Житомирська область", name_en: "Zhytomyr", osm_id: 71245 },
    RegionInfo { name: "Закарпатська область", name_en: "Zakarpattia", osm_id: 72489 },
    RegionInfo { name: "Запорізька область", name_en: "Zaporizhia", osm_id: 71980 },
    RegionInfo { name: "Івано-Франківська область", name_en: "Ivano-Frankivsk", osm_id: 72488 },
    RegionInfo { name: "Київська область", name_en: "Kyiv Oblast", osm_id: 71248 },
    RegionInfo { name: "Кіровоградська область", name_en: "Kirovohrad", osm_id: 101859 },
    RegionInfo { name: "Луганська область", name_en: "Luhansk", osm_id: 71971 },
    RegionInfo { name: "Львівська область", name_en: "Lviv", osm_id: 72380 },
    RegionInfo { name: "Миколаївська область", name_en: "Mykolaiv", osm_id: 72635 },
    RegionInfo { name: "Одеська область", name_en: "Odesa", osm_id: 72634 },
    RegionInfo { name: "Полтавська область", name_en: "Poltava", osm_id: 91294 },
    RegionInfo { name: "Рівненська область", name_en: "Rivne", osm_id: 71236 },
    RegionInfo { name: "Сумська область", name_en: "Sumy", osm_id: 71250 },
    RegionInfo { name: "Тернопільська область", name_en: "Ternopil", osm_id: 72525 },
    RegionInfo { name: "Харківська область", name_en: "Kharkiv", osm_id: 71254 },
    RegionInfo { name: "Херсонська область", name_en: "Kherson", osm_id: 71022 },
    RegionInfo { name: "Хмельницька область", name_en: "Khmelnytskyi", osm_id: 90742 },
    RegionInfo { name: "Черкаська область", name_en: "Cherkasy", osm_id: 91278 },
    RegionInfo { name: "Чернівецька область", name_en: "Chernivtsi", osm_id: 72526 },
    RegionInfo { name: "Чернігівська область", name_en: "Chernihiv", osm_id: 71249 },
    RegionInfo { name: "м. Київ", name_en: "Kyiv City", osm_id: 421866 },
    RegionInfo { name: "Автономна Республіка Крим", name_en: "Crimea", osm_id: 72639 },
    RegionInfo { name: "м. Севастополь", name_en: "Sevastopol", osm_id: 1574364 },
];

/// Historical and abbreviated spellings seen in upstream feeds.
static ALIASES: [(&str, &str); 4] = [
    ("АР Крим", "Автономна Республіка Крим"),
    ("Крим", "Автономна Республіка Крим"),
    ("Севастополь", "м. Севастополь"),
    ("Київ", "м. Київ"),
];

/// Lookup table from canonical region name to its metadata.
pub struct RegionCatalog {
    by_name: HashMap<&'static str, &'static RegionInfo>,
    aliases: HashMap<&'static str, &'static str>,
}

impl RegionCatalog {
    /// Build the catalog from the embedded region table.
    pub fn builtin() -> Self {
        let by_name = REGIONS.iter().map(|r| (r.name, r)).collect();
        let aliases = ALIASES.iter().copied().collect();
        Self { by_name, aliases }
    }

    /// Number of cataloged regions.
    pub fn len(&self) -> usize {
        REGIONS.len()
    }

    /// Whether the catalog is empty. Never true for the builtin catalog.
    pub fn is_empty(&self) -> bool {
        REGIONS.is_empty()
    }

    /// Iterate regions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &'static RegionInfo> {
        REGIONS.iter()
    }

    /// Look up a region by its canonical name.
    pub fn lookup(&self, name: &str) -> Option<&'static RegionInfo> {
        self.by_name.get(name).copied()
    }

    /// Resolve a possibly non-canonical raw name to its canonical form.
    ///
    /// Tries, in order: exact catalog match, the alias table, and the name
    /// with the " область" suffix appended. Unknown names are returned
    /// verbatim; that is a recovered condition, not an error.
    pub fn normalize<'a>(&self, raw: &'a str) -> &'a str {
        let trimmed = raw.trim();
        if let Some(info) = self.by_name.get(trimmed) {
            return info.name;
        }
        if let Some(canonical) = self.aliases.get(trimmed) {
            return canonical;
        }
        // Feeds sometimes drop the oblast suffix ("Харківська").
        let with_suffix = format!("{} область", trimmed);
        if let Some(info) = self.by_name.get(with_suffix.as_str()) {
            return info.name;
        }
        raw
    }

    /// English display name for a region, falling back to the raw name for
    /// regions outside the catalog.
    pub fn name_en<'a>(&self, name: &'a str) -> &'a str {
        self.lookup(name).map(|r| r.name_en).unwrap_or(name)
    }
}

/// Derive the display slug for a region name: lowercase, spaces become
/// underscores, punctuation is stripped.
///
/// Two differently punctuated names can collapse to the same slug, so the
/// slug is a display key only; the canonical name keys the output map.
pub fn region_slug(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_alphanumeric() || c == '_' || c == '-' {
                Some(c)
            } else {
                None
            }
        })
        .collect()
}

/// Display metadata for one threat type.
#[derive(Debug, Clone, Copy)]
pub struct ThreatMeta {
    pub label: &'static str,
    pub label_en: &'static str,
    pub icon: &'static str,
    /// Priority weight in 0..=10 feeding the intensity score.
    pub priority: u8,
    pub color: &'static str,
    /// Optional map fill pattern.
    pub pattern: Option<&'static str>,
}

/// Weight applied to threat identifiers missing from the catalog.
pub const DEFAULT_THREAT_PRIORITY: u8 = 5;

static THREATS: [(&str, ThreatMeta); 9] = [
    ("air_raid", ThreatMeta {
        label: "Повітряна тривога",
        label_en: "Air raid alert",
        icon: "plane",
        priority: 10,
        color: "#dc143c",
        pattern: None,
    }),
    ("tactical_aviation", ThreatMeta {
        label: "Активність тактичної авіації",
        label_en: "Tactical aviation activity",
        icon: "fighter-jet",
        priority: 8,
        color: "#ff6b6b",
        pattern: None,
    }),
    ("cruise_missiles", ThreatMeta {
        label: "Крилаті ракети",
        label_en: "Cruise missiles",
        icon: "rocket",
        priority: 9,
        color: "#ff4444",
        pattern: None,
    }),
    ("ballistic_missiles", ThreatMeta {
        label: "Балістичні ракети",
        label_en: "Ballistic missiles",
        icon: "missile",
        priority: 10,
        color: "#cc0000",
        pattern: None,
    }),
    ("drones", ThreatMeta {
        label: "Загроза застосування БпЛА",
        label_en: "UAV threat",
        icon: "drone",
        priority: 6,
        color: "#ff8866",
        pattern: None,
    }),
    ("artillery", ThreatMeta {
        label: "Загроза артобстрілу",
        label_en: "Artillery threat",
        icon: "explosion",
        priority: 7,
        color: "#ff9999",
        pattern: Some("dotted"),
    }),
    ("chemical", ThreatMeta {
        label: "Хімічна загроза",
        label_en: "Chemical threat",
        icon: "biohazard",
        priority: 9,
        color: "#b22222",
        pattern: None,
    }),
    ("nuclear", ThreatMeta {
        label: "Радіаційна загроза",
        label_en: "Nuclear threat",
        icon: "radiation",
        priority: 10,
        color: "#8b0000",
        pattern: None,
    }),
    ("street_fighting", ThreatMeta {
        label: "Загроза вуличних боїв",
        label_en: "Street fighting threat",
        icon: "shield-alt",
        priority: 5,
        color: "#cd5c5c",
        pattern: Some("striped"),
    }),
];

/// Lookup table from threat identifier to display metadata.
pub struct ThreatCatalog {
    by_id: HashMap<&'static str, &'static ThreatMeta>,
}

impl ThreatCatalog {
    /// Build the catalog from the embedded threat table.
    pub fn builtin() -> Self {
        let by_id = THREATS.iter().map(|(id, meta)| (*id, meta)).collect();
        Self { by_id }
    }

    /// Metadata for a threat identifier.
    pub fn get(&self, threat: &str) -> Option<&'static ThreatMeta> {
        self.by_id.get(threat).copied()
    }

    /// Priority weight for a threat identifier. Unknown identifiers get
    /// [`DEFAULT_THREAT_PRIORITY`] rather than being rejected.
    pub fn priority(&self, threat: &str) -> u8 {
        self.get(threat)
            .map(|m| m.priority)
            .unwrap_or(DEFAULT_THREAT_PRIORITY)
    }
}
