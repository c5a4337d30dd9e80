use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Zone use codes as returned by the zoning map service.
pub fn zone_type_label(code: &str) -> Option<&'static str> {
    let label = match code {
        "11" => "第１種低層住居専用地域",
        "12" => "第２種低層住居専用地域",
        "21" => "第１種中高層住居専用地域",
        "22" => "第２種中高層住居専用地域",
        "31" => "第１種住居地域",
        "32" => "第２種住居地域",
        "40" => "準住居地域",
        "45" => "田園住居地域",
        "51" => "近隣商業地域",
        "52" => "商業地域",
        "61" => "準工業地域",
        "62" => "工業地域",
        "63" => "工業専用地域",
        "71" => "無指定",
        _ => return None,
    };
    Some(label)
}

pub fn fire_area_label(code: &str) -> Option<&'static str> {
    let label = match code {
        "0" => "指定なし",
        "1" => "準防火地域",
        "2" => "防火地域",
        _ => return None,
    };
    Some(label)
}

pub fn area_classification_label(code: &str) -> Option<&'static str> {
    let label = match code {
        "1" => "市街化区域",
        "2" => "市街化調整区域",
        "3" => "非線引区域",
        "8" => "準都市計画区域",
        "9" => "都市計画区域外",
        _ => return None,
    };
    Some(label)
}

fn kind_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+$").unwrap())
}

fn max_height_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)m$").unwrap())
}

fn min_height_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-(\d+)m$").unwrap())
}

/// Expands a raw height district notation into display lines. The
/// service encodes a district kind as a bare number ("9"), a maximum
/// height as "60m", a minimum height as "-10m", and combinations joined
/// with colons (kind, maximum height, north slope rule). Unknown shapes
/// pass through verbatim. "0" and the empty string mean no designation.
pub fn parse_height_district(raw: &str) -> Option<Vec<String>> {
    if raw.is_empty() || raw == "0" {
        return None;
    }

    let mut res = vec![];

    if kind_re().is_match(raw) {
        res.push(format!("第{raw}種高度地区"));
    } else if let Some(caps) = max_height_re().captures(raw) {
        res.push(format!("最高高度{}m", &caps[1]));
    } else if let Some(caps) = min_height_re().captures(raw) {
        res.push(format!("最低高度{}m", &caps[1]));
    } else if raw.contains(':') {
        let parts: Vec<&str> = raw.split(':').collect();

        if let Some(first) = parts.first() {
            if kind_re().is_match(first) {
                res.push(format!("第{first}種高度地区"));
            }
        }

        if let Some(second) = parts.get(1).filter(|it| !it.is_empty()) {
            match max_height_re().captures(second) {
                Some(caps) => res.push(format!("最高高度{}m", &caps[1])),
                None => res.push(format!("最高限高度: {second}")),
            }
        }

        if let Some(third) = parts.get(2).filter(|it| !it.is_empty()) {
            res.push(format!("北側斜線: {third}"));
        }
    } else {
        res.push(raw.to_string());
    }

    if res.is_empty() {
        None
    } else {
        Some(res)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenicDistrict {
    pub name: String,
    pub kind: String,
}

pub fn parse_scenic_district(name: Option<&str>, kind: Option<&str>) -> Option<ScenicDistrict> {
    let name = name.unwrap_or_default();
    let kind = kind.unwrap_or_default();
    if name.is_empty() && kind.is_empty() {
        return None;
    }
    Some(ScenicDistrict {
        name: name.to_string(),
        kind: kind.to_string(),
    })
}
