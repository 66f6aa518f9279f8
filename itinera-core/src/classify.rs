//! Deterministic keyword classifier.
//!
//! One algorithm, several ordered tables. Tables are plain statics passed in explicitly;
//! the first rule with a keyword contained in the text wins.

use crate::model::{Category, SectionKind};

/// Ordered (label, keywords) rules. Keywords are lowercase.
pub type KeywordTable<C> = [(C, &'static [&'static str])];

/// Lowercase with Turkish dotted/dotless I handling ("İ" -> "i", "I" -> "ı").
pub fn fold_tr(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'İ' => 'i',
            'I' => 'ı',
            _ => c,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Return the label of the first rule with a keyword found in `text`.
pub fn classify<C: Copy>(text: &str, table: &KeywordTable<C>) -> Option<C> {
    // Both foldings: Turkish for "İSTANBUL", plain for "HISTORIC"
    let turkish = fold_tr(text);
    let plain = text.to_lowercase();
    table
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|kw| turkish.contains(kw) || plain.contains(kw))
        })
        .map(|(label, _)| *label)
}

/// Activity text -> category, `Other` when nothing matches.
pub fn classify_activity(text: &str) -> Category {
    classify(text, ACTIVITY_TABLE).unwrap_or(Category::Other)
}

/// Heading text -> section kind, `None` when the heading names no known topic.
pub fn classify_section(heading: &str) -> Option<SectionKind> {
    classify(heading, SECTION_TABLE)
}

pub static SECTION_TABLE: &KeywordTable<SectionKind> = &[
    (
        SectionKind::CityInfo,
        &[
            "şehir hakkında",
            "şehir bilgi",
            "genel bilgi",
            "genel bakış",
            "hakkında",
            "giriş",
            "city info",
            "overview",
            "about the city",
        ],
    ),
    (
        SectionKind::DailyPlan,
        &[
            "günlük plan",
            "gün gün",
            "program",
            "gezi planı",
            "seyahat planı",
            "rota",
            "itinerary",
            "day ",
            "daily plan",
        ],
    ),
    (
        SectionKind::FoodGuide,
        &[
            "yeme",
            "içme",
            "yemek",
            "mutfak",
            "lezzet",
            "restoran",
            "food",
            "cuisine",
            "where to eat",
        ],
    ),
    (
        SectionKind::PracticalInfo,
        &[
            "pratik",
            "ulaşım",
            "ipucu",
            "ipuçları",
            "öneriler",
            "faydalı",
            "practical",
            "tips",
            "getting around",
        ],
    ),
    (
        SectionKind::BudgetEstimate,
        &[
            "bütçe",
            "maliyet",
            "masraf",
            "harcama",
            "fiyat",
            "budget",
            "cost",
            "expenses",
        ],
    ),
];

pub static ACTIVITY_TABLE: &KeywordTable<Category> = &[
    (
        Category::Food,
        &[
            "kahvaltı",
            "öğle yemeği",
            "akşam yemeği",
            "yemek",
            "restoran",
            "lokanta",
            "meyhane",
            "kafe",
            "kahve",
            "tatlı",
            "kebap",
            "balık",
            "breakfast",
            "lunch",
            "dinner",
            "restaurant",
            "cafe",
        ],
    ),
    (
        Category::Culture,
        &[
            "müze",
            "saray",
            "cami",
            "kilise",
            "tarihi",
            "antik",
            "ayasofya",
            "topkapı",
            "kale",
            "galeri",
            "sergi",
            "ören yeri",
            "museum",
            "palace",
            "mosque",
            "church",
            "historic",
            "gallery",
        ],
    ),
    (
        Category::Shopping,
        &[
            "çarşı",
            "alışveriş",
            "pazar",
            "bazaar",
            "mağaza",
            "avm",
            "butik",
            "shopping",
            "market",
        ],
    ),
    (
        Category::Sightseeing,
        &[
            "park",
            "doğa",
            "manzara",
            "boğaz",
            "sahil",
            "plaj",
            "yürüyüş",
            "tekne",
            "seyir",
            "bahçe",
            "orman",
            "göl",
            "tur",
            "gezi",
            "viewpoint",
            "beach",
            "hike",
            "tour",
        ],
    ),
    (
        Category::Transport,
        &[
            "havalimanı",
            "transfer",
            "otobüs",
            "metro",
            "vapur",
            "feribot",
            "tren",
            "taksi",
            "airport",
            "ferry",
            "train",
            "taxi",
        ],
    ),
    (
        Category::Accommodation,
        &[
            "otel",
            "konaklama",
            "check-in",
            "check-out",
            "pansiyon",
            "hostel",
            "hotel",
        ],
    ),
    (
        Category::Entertainment,
        &[
            "konser",
            "gösteri",
            "tiyatro",
            "sinema",
            "festival",
            "gece hayatı",
            "bar",
            "concert",
            "show",
            "theatre",
            "nightlife",
        ],
    ),
];
