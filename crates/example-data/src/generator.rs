//! Deterministic catalog generation.
//!
//! The same seed definition always yields the same catalog: the RNG is a
//! seeded ChaCha8 stream and every choice draws from it in a fixed order.

use std::collections::HashMap;

use fake::Fake;
use fake::faker::company::en::CompanyName;
use rand::Rng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::catalog::{
    ApplicationSeed, ExampleCatalog, LocalizedSeed, PlatformSupportSeed, ScreenshotSeed, TagSeed,
};
use crate::registry::SeedDefinition;

/// Concept template: slug stem plus localized copy in fi/en/sv/ru order.
struct Concept {
    stem: &'static str,
    name: [&'static str; 4],
    short: [&'static str; 4],
    long: [&'static str; 4],
}

const CONCEPTS: &[Concept] = &[
    Concept {
        stem: "library-reader",
        name: ["Kirjastolukija", "Library Reader", "Biblioteksläsare", "Библиотечный ридер"],
        short: [
            "E-kirjojen lukusovellus",
            "E-book reading app",
            "App för e-böcker",
            "Приложение для чтения электронных книг",
        ],
        long: [
            "Lainaa ja lue kaupunginkirjaston e-kirjoja suoraan laitteellasi.",
            "Borrow and read the city library's e-books straight on your device.",
            "Låna och läs stadsbibliotekets e-böcker direkt på din enhet.",
            "Берите и читайте электронные книги городской библиотеки на своём устройстве.",
        ],
    },
    Concept {
        stem: "transit-times",
        name: ["Reittihaku", "Transit Times", "Reseplaneraren", "Маршруты"],
        short: [
            "Joukkoliikenteen aikataulut",
            "Public transport schedules",
            "Kollektivtrafikens tidtabeller",
            "Расписание общественного транспорта",
        ],
        long: [
            "Reaaliaikaiset aikataulut ja reittiehdotukset koko seudulle.",
            "Real-time schedules and route suggestions for the whole region.",
            "Realtidstabeller och ruttförslag för hela regionen.",
            "Расписания в реальном времени и маршруты по всему региону.",
        ],
    },
    Concept {
        stem: "city-weather",
        name: ["Kaupunkisää", "City Weather", "Stadsväder", "Городская погода"],
        short: [
            "Paikallinen sääennuste",
            "Local weather forecast",
            "Lokal väderprognos",
            "Местный прогноз погоды",
        ],
        long: [
            "Tuntikohtainen ennuste ja varoitukset omalle alueellesi.",
            "Hourly forecast and warnings for your neighbourhood.",
            "Timprognos och varningar för ditt närområde.",
            "Почасовой прогноз и предупреждения для вашего района.",
        ],
    },
    Concept {
        stem: "event-finder",
        name: ["Tapahtumahaku", "Event Finder", "Evenemangssök", "Поиск событий"],
        short: [
            "Kaupungin tapahtumat",
            "City events",
            "Stadens evenemang",
            "События города",
        ],
        long: [
            "Selaa konsertteja, näyttelyitä ja tapahtumia kartalla.",
            "Browse concerts, exhibitions, and happenings on a map.",
            "Bläddra bland konserter, utställningar och evenemang på kartan.",
            "Ищите концерты, выставки и мероприятия на карте.",
        ],
    },
    Concept {
        stem: "museum-guide",
        name: ["Museo-opas", "Museum Guide", "Museiguide", "Музейный гид"],
        short: [
            "Opastetut museokierrokset",
            "Guided museum tours",
            "Guidade museivisningar",
            "Экскурсии по музеям",
        ],
        long: [
            "Ääniopastukset ja pohjapiirrokset kaupungin museoihin.",
            "Audio guides and floor plans for the city's museums.",
            "Ljudguider och planritningar för stadens museer.",
            "Аудиогиды и планы залов музеев города.",
        ],
    },
    Concept {
        stem: "school-menu",
        name: ["Kouluruoka", "School Menu", "Skolmaten", "Школьное меню"],
        short: [
            "Koulujen ruokalistat",
            "School lunch menus",
            "Skolornas matsedlar",
            "Меню школьных обедов",
        ],
        long: [
            "Päivittäiset ruokalistat ja allergiatiedot kouluittain.",
            "Daily menus and allergy information per school.",
            "Dagliga matsedlar och allergiinformation per skola.",
            "Ежедневное меню и сведения об аллергенах по школам.",
        ],
    },
];

const CATEGORY_SEEDS: &[(&str, [&str; 4])] = &[
    ("culture", ["Kulttuuri", "Culture", "Kultur", "Культура"]),
    ("mobility", ["Liikkuminen", "Mobility", "Mobilitet", "Транспорт"]),
    ("education", ["Oppiminen", "Education", "Utbildning", "Образование"]),
    ("daily-life", ["Arki", "Daily life", "Vardag", "Быт"]),
];

const PLATFORM_SEEDS: &[(&str, [&str; 4])] = &[
    ("android", ["Android", "Android", "Android", "Android"]),
    ("ios", ["iOS", "iOS", "iOS", "iOS"]),
    ("windows", ["Windows", "Windows", "Windows", "Windows"]),
    ("web", ["Selain", "Web", "Webb", "Веб"]),
];

const ACCESSIBILITY_SEEDS: &[(&str, [&str; 4])] = &[
    (
        "screen-reader",
        ["Ruudunlukija", "Screen reader", "Skärmläsare", "Экранный диктор"],
    ),
    (
        "high-contrast",
        ["Suurikontrastinen", "High contrast", "Hög kontrast", "Высокий контраст"],
    ),
    (
        "plain-language",
        ["Selkokieli", "Plain language", "Lättläst", "Простой язык"],
    ),
];

const LANGUAGE_CODES: [&str; 4] = ["fi", "en", "sv", "ru"];

/// Half-step rating scale; indexes are drawn instead of computing floats.
const RATINGS: [f32; 7] = [2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0];

fn tag_seeds(source: &[(&str, [&str; 4])]) -> Vec<TagSeed> {
    source
        .iter()
        .map(|(slug, name)| TagSeed {
            slug: (*slug).to_owned(),
            name: LocalizedSeed::from_variants(*name),
        })
        .collect()
}

fn pick_rating(rng: &mut ChaCha8Rng) -> Option<f32> {
    RATINGS.choose(rng).copied()
}

fn pick_languages(rng: &mut ChaCha8Rng) -> Vec<String> {
    let count = rng.random_range(1..=LANGUAGE_CODES.len());
    LANGUAGE_CODES
        .iter()
        .take(count)
        .map(|code| (*code).to_owned())
        .collect()
}

fn pick_publish_date(rng: &mut ChaCha8Rng) -> String {
    let year = rng.random_range(2015..=2024);
    let month = rng.random_range(1..=12);
    let day = rng.random_range(1..=28);
    format!("{year:04}-{month:02}-{day:02}")
}

fn pick_platforms(rng: &mut ChaCha8Rng, slug: &str) -> Vec<PlatformSupportSeed> {
    let count = rng.random_range(1..=PLATFORM_SEEDS.len());
    PLATFORM_SEEDS
        .iter()
        .take(count)
        .map(|(platform, _)| PlatformSupportSeed {
            platform: (*platform).to_owned(),
            store_url: match *platform {
                "android" => Some(format!("https://play.example.com/store/apps/{slug}")),
                "ios" => Some(format!("https://apps.example.com/app/{slug}")),
                _ => None,
            },
            rating: pick_rating(rng),
            nr_reviews: Some(rng.random_range(0..5000)),
        })
        .collect()
}

fn screenshots_for(platforms: &[PlatformSupportSeed], slug: &str) -> Vec<ScreenshotSeed> {
    platforms
        .iter()
        .take(2)
        .map(|support| ScreenshotSeed {
            image: format!("screenshots/{slug}-{}.png", support.platform),
            platform: support.platform.clone(),
        })
        .collect()
}

/// Generate a catalog from one seed definition.
///
/// Calling this twice with the same definition yields identical catalogs.
#[must_use]
pub fn generate_example_catalog(definition: &SeedDefinition) -> ExampleCatalog {
    let mut rng = ChaCha8Rng::seed_from_u64(definition.seed);

    let categories = tag_seeds(CATEGORY_SEEDS);
    let platforms = tag_seeds(PLATFORM_SEEDS);
    let accessibilities = tag_seeds(ACCESSIBILITY_SEEDS);

    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    let applications = CONCEPTS
        .iter()
        .cycle()
        .take(definition.application_count)
        .map(|concept| {
            let occurrence = occurrences.entry(concept.stem).or_insert(0);
            let slug = if *occurrence == 0 {
                concept.stem.to_owned()
            } else {
                format!("{}-{}", concept.stem, *occurrence)
            };
            *occurrence += 1;

            let vendor: String = CompanyName().fake_with_rng(&mut rng);
            let category = CATEGORY_SEEDS.choose(&mut rng).map(|(s, _)| (*s).to_owned());
            let accessibility = if rng.random_bool(0.5) {
                ACCESSIBILITY_SEEDS
                    .choose(&mut rng)
                    .map(|(s, _)| (*s).to_owned())
            } else {
                None
            };
            let supported = pick_platforms(&mut rng, &slug);
            let screenshots = screenshots_for(&supported, &slug);

            ApplicationSeed {
                name: LocalizedSeed::from_variants(concept.name),
                short_description: LocalizedSeed::from_variants(concept.short),
                description: LocalizedSeed::from_variants(concept.long),
                vendor: Some(vendor.clone()),
                image: Some(format!("icons/{slug}.png")),
                publish_date: Some(pick_publish_date(&mut rng)),
                rating: pick_rating(&mut rng),
                publisher_url: Some(format!(
                    "https://{}.example.com",
                    slug.replace('-', "")
                )),
                support_url: Some(format!("https://{}.example.com/support", slug.replace('-', ""))),
                contact_email: Some(format!("support@{}.example.com", slug.replace('-', ""))),
                category,
                accessibility,
                languages: pick_languages(&mut rng),
                platforms: supported,
                screenshots,
                slug,
            }
        })
        .collect();

    ExampleCatalog {
        categories,
        platforms,
        accessibilities,
        applications,
    }
}
