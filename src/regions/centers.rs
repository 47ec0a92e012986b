// src/regions/centers.rs

use super::key::{HOKKAIDO, RegionKey};
use crate::math::types::LonLat;

/// Approximate region centers as (name, lon, lat), prefectures in
/// JIS order.
static PREFECTURE_CENTERS: [(&str, f64, f64); 47] = [
    ("北海道", 141.3469, 43.0642),
    ("青森県", 140.7400, 40.8244),
    ("岩手県", 141.1527, 39.7036),
    ("宮城県", 140.8719, 38.2688),
    ("秋田県", 140.1025, 39.7186),
    ("山形県", 140.3633, 38.2404),
    ("福島県", 140.4676, 37.7503),
    ("茨城県", 140.4468, 36.3418),
    ("栃木県", 139.8836, 36.5657),
    ("群馬県", 139.0608, 36.3911),
    ("埼玉県", 139.6489, 35.8569),
    ("千葉県", 140.1233, 35.6051),
    ("東京都", 139.6917, 35.6895),
    ("神奈川県", 139.6425, 35.4478),
    ("新潟県", 139.0236, 37.9026),
    ("富山県", 137.2114, 36.6953),
    ("石川県", 136.6256, 36.5947),
    ("福井県", 136.2216, 36.0652),
    ("山梨県", 138.5684, 35.6642),
    ("長野県", 138.1810, 36.6513),
    ("岐阜県", 136.7223, 35.3912),
    ("静岡県", 138.3831, 34.9769),
    ("愛知県", 136.9066, 35.1802),
    ("三重県", 136.5086, 34.7303),
    ("滋賀県", 135.8686, 35.0045),
    ("京都府", 135.7556, 35.0210),
    ("大阪府", 135.5200, 34.6863),
    ("兵庫県", 135.1830, 34.6913),
    ("奈良県", 135.8327, 34.6851),
    ("和歌山県", 135.1675, 34.2260),
    ("鳥取県", 134.2383, 35.5036),
    ("島根県", 133.0505, 35.4723),
    ("岡山県", 133.9344, 34.6618),
    ("広島県", 132.4596, 34.3966),
    ("山口県", 131.4714, 34.1859),
    ("徳島県", 134.5594, 34.0658),
    ("香川県", 134.0434, 34.3401),
    ("愛媛県", 132.7660, 33.8416),
    ("高知県", 133.5311, 33.5597),
    ("福岡県", 130.4181, 33.6064),
    ("佐賀県", 130.2988, 33.2494),
    ("長崎県", 129.8737, 32.7448),
    ("熊本県", 130.7417, 32.7898),
    ("大分県", 131.6126, 33.2382),
    ("宮崎県", 131.4239, 31.9111),
    ("鹿児島県", 130.5581, 31.5602),
    ("沖縄県", 127.6809, 26.2124),
];

static HOKKAIDO_PART_CENTERS: [(&str, f64, f64); 4] = [
    ("道南", 140.7288, 41.7687),
    ("道央", 141.3469, 43.0642),
    ("道北", 142.3650, 43.7706),
    ("道東", 144.3814, 42.9849),
];

/// Center of Japan, used when nothing better is known.
pub const JAPAN_CENTER: LonLat = LonLat {
    x: 138.2529,
    y: 36.2048,
};

/// Names of all prefectures in JIS order
pub fn prefectures() -> impl Iterator<Item = &'static str> {
    PREFECTURE_CENTERS.iter().map(|(name, _, _)| *name)
}

/// Known center of a region. A Hokkaido key with an unknown part falls back
/// to the center of Hokkaido.
pub fn region_center(key: &RegionKey) -> Option<LonLat> {
    let part_center = key
        .hokkaido_part()
        .filter(|_| key.prefecture_name() == HOKKAIDO)
        .and_then(|part| find(&HOKKAIDO_PART_CENTERS, part));
    part_center.or_else(|| find(&PREFECTURE_CENTERS, key.prefecture_name()))
}

fn find(table: &[(&str, f64, f64)], name: &str) -> Option<LonLat> {
    table
        .iter()
        .find(|(entry, _, _)| *entry == name)
        .map(|&(_, x, y)| LonLat { x, y })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::key::HOKKAIDO_PARTS;

    #[test]
    fn test_every_prefecture_has_a_center() {
        assert_eq!(prefectures().count(), 47);
        for name in prefectures() {
            let center = region_center(&RegionKey::prefecture(name)).unwrap();
            assert!((122.0..=146.0).contains(&center.x), "{name}");
            assert!((24.0..=46.0).contains(&center.y), "{name}");
        }
    }

    #[test]
    fn test_hokkaido_parts() {
        for part in HOKKAIDO_PARTS {
            assert!(region_center(&RegionKey::hokkaido(part)).is_some());
        }
        let south = region_center(&RegionKey::hokkaido("道南")).unwrap();
        let east = region_center(&RegionKey::hokkaido("道東")).unwrap();
        assert!(south.y < east.y && south.x < east.x);
        assert_eq!(
            region_center(&RegionKey::hokkaido("未知")),
            region_center(&RegionKey::prefecture("北海道"))
        );
    }

    #[test]
    fn test_unknown_region() {
        assert!(region_center(&RegionKey::prefecture("Atlantis")).is_none());
    }
}
