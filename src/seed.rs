//! Synthetic sample data
//!
//! Customers are drawn from seven locales (en_US, en_GB, en_CA, es_MX,
//! de_DE, fr_FR, ja_JP). The country code is drawn independently of the
//! locale from a list of ISO 3166-1 alpha-2 codes, so a Japanese name with a
//! `LU` country code is expected.

use crate::model::{NewCustomer, NewProduct};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

/// Order quantities are drawn from this range
pub const QUANTITY_RANGE: std::ops::RangeInclusive<u32> = 1..=5;

const CARD_LENGTH: usize = 16;

const CARD_PREFIXES: &[&str] = &["4", "51", "52", "53", "54", "55"];

const COUNTRY_CODES: &[&str] = &[
    "AR", "AT", "AU", "BE", "BR", "CA", "CH", "CL", "CN", "CO", "CZ", "DE", "DK", "EG", "ES",
    "FI", "FR", "GB", "GR", "HU", "IE", "IL", "IN", "IS", "IT", "JP", "KE", "KR", "LU", "MA",
    "MX", "NG", "NL", "NO", "NZ", "PE", "PL", "PT", "RO", "SE", "SG", "TH", "TR", "UA", "US",
    "VN", "ZA",
];

const FREE_EMAIL_DOMAINS: &[&str] = &[
    "example.com", "example.org", "example.net", "mail.test", "inbox.test",
];

/// Name and address pools for one locale
struct Locale {
    first_names: &'static [&'static str],
    last_names: &'static [&'static str],
    streets: &'static [&'static str],
    cities: &'static [&'static str],
    style: AddressStyle,
}

#[derive(Clone, Copy)]
enum AddressStyle {
    /// "221 Baker Street, London"
    NumberFirst,
    /// "Hauptstraße 12, Berlin"
    StreetFirst,
    /// "東京都新宿区1-2-3", family name first
    Japanese,
}

const LOCALES: &[Locale] = &[
    // en_US
    Locale {
        first_names: &["James", "Mary", "Robert", "Patricia", "Michael", "Linda", "David", "Susan"],
        last_names: &["Smith", "Johnson", "Williams", "Brown", "Jones", "Miller", "Davis", "Wilson"],
        streets: &["Maple Avenue", "Oak Street", "Washington Boulevard", "Park Lane", "Elm Drive"],
        cities: &["Springfield", "Riverside", "Fairview", "Madison", "Georgetown"],
        style: AddressStyle::NumberFirst,
    },
    // en_GB
    Locale {
        first_names: &["Oliver", "Amelia", "Harry", "Isla", "George", "Ava", "Jack", "Emily"],
        last_names: &["Taylor", "Evans", "Thomas", "Roberts", "Walker", "Wright", "Hughes", "Green"],
        streets: &["High Street", "Station Road", "Church Lane", "Victoria Road", "Mill Lane"],
        cities: &["London", "Leeds", "Bristol", "Norwich", "York"],
        style: AddressStyle::NumberFirst,
    },
    // en_CA
    Locale {
        first_names: &["Liam", "Olivia", "Noah", "Charlotte", "Lucas", "Chloe", "Ethan", "Maya"],
        last_names: &["Tremblay", "Martin", "Roy", "MacDonald", "Campbell", "Anderson", "Lee"],
        streets: &["Yonge Street", "King Street West", "Queen Street", "Lakeshore Road"],
        cities: &["Toronto", "Ottawa", "Halifax", "Calgary", "Winnipeg"],
        style: AddressStyle::NumberFirst,
    },
    // es_MX
    Locale {
        first_names: &["José", "María", "Juan", "Guadalupe", "Luis", "Sofía", "Carlos", "Ximena"],
        last_names: &["Hernández", "García", "Martínez", "López", "González", "Pérez", "Sánchez"],
        streets: &["Calle Reforma", "Avenida Juárez", "Calle Hidalgo", "Calzada de Tlalpan"],
        cities: &["Ciudad de México", "Guadalajara", "Monterrey", "Puebla", "Mérida"],
        style: AddressStyle::StreetFirst,
    },
    // de_DE
    Locale {
        first_names: &["Lukas", "Anna", "Jonas", "Lea", "Felix", "Hannah", "Paul", "Mia"],
        last_names: &["Müller", "Schmidt", "Schneider", "Fischer", "Weber", "Meyer", "Wagner"],
        streets: &["Hauptstraße", "Bahnhofstraße", "Gartenweg", "Schillerstraße", "Lindenallee"],
        cities: &["Berlin", "Hamburg", "München", "Köln", "Leipzig"],
        style: AddressStyle::StreetFirst,
    },
    // fr_FR
    Locale {
        first_names: &["Gabriel", "Louise", "Raphaël", "Jade", "Arthur", "Emma", "Jules", "Alice"],
        last_names: &["Martin", "Bernard", "Dubois", "Thomas", "Robert", "Richard", "Petit"],
        streets: &["rue de la Paix", "avenue Victor Hugo", "boulevard Voltaire", "rue Lafayette"],
        cities: &["Paris", "Lyon", "Marseille", "Toulouse", "Nantes"],
        style: AddressStyle::NumberFirst,
    },
    // ja_JP
    Locale {
        first_names: &["太郎", "花子", "翔太", "さくら", "大輔", "美咲", "健一", "陽菜"],
        last_names: &["佐藤", "鈴木", "高橋", "田中", "伊藤", "渡辺", "山本", "中村"],
        streets: &["新宿区西新宿", "中央区銀座", "北区梅田", "中区栄", "博多区博多駅前"],
        cities: &["東京都", "大阪府", "愛知県", "福岡県", "北海道"],
        style: AddressStyle::Japanese,
    },
];

/// Pseudo-random generator for sample rows
pub struct SampleGenerator {
    rng: StdRng,
}

impl SampleGenerator {
    /// Generator seeded from the OS entropy source
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible generator
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Build from an optional seed
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map(Self::with_seed).unwrap_or_default()
    }

    /// Generate one customer
    pub fn customer(&mut self) -> NewCustomer {
        let locale = self.pick(LOCALES);
        let first = *self.pick(locale.first_names);
        let last = *self.pick(locale.last_names);

        let name = match locale.style {
            AddressStyle::Japanese => format!("{} {}", last, first),
            _ => format!("{} {}", first, last),
        };

        let street = *self.pick(locale.streets);
        let city = *self.pick(locale.cities);
        let address = match locale.style {
            AddressStyle::NumberFirst => {
                format!("{} {}, {}", self.rng.random_range(1..=999), street, city)
            }
            AddressStyle::StreetFirst => {
                format!("{} {}, {}", street, self.rng.random_range(1..=199), city)
            }
            AddressStyle::Japanese => format!(
                "{}{}{}-{}-{}",
                city,
                street,
                self.rng.random_range(1..=9),
                self.rng.random_range(1..=30),
                self.rng.random_range(1..=20)
            ),
        };

        let email_address = self.email(first, last);
        let country_code = self.pick(COUNTRY_CODES).to_string();

        NewCustomer::new(name, email_address, address, country_code)
    }

    /// 16-digit card number with a valid Luhn check digit
    pub fn card_number(&mut self) -> String {
        let mut digits: Vec<u32> = self
            .pick(CARD_PREFIXES)
            .chars()
            .filter_map(|c| c.to_digit(10))
            .collect();

        while digits.len() < CARD_LENGTH - 1 {
            digits.push(self.rng.random_range(0..10));
        }
        digits.push(luhn_check_digit(&digits));

        digits
            .into_iter()
            .filter_map(|d| char::from_digit(d, 10))
            .collect()
    }

    /// Order quantity in `QUANTITY_RANGE`
    pub fn quantity(&mut self) -> u32 {
        self.rng.random_range(QUANTITY_RANGE)
    }

    /// Pick one product id, `None` when there are no products
    pub fn pick_product(&mut self, product_ids: &[i64]) -> Option<i64> {
        product_ids.choose(&mut self.rng).copied()
    }

    /// The fixed product catalogue inserted on every seed run
    pub fn products(&self) -> Vec<NewProduct> {
        vec![
            NewProduct::new("Espresso Beans 1kg", 24.50, "Dark roast, whole bean", "Grocery"),
            NewProduct::new("Ceramic Mug", 9.99, "350ml, dishwasher safe", "Kitchen"),
            NewProduct::new("French Press", 32.00, "Borosilicate glass, 1L", "Kitchen"),
            NewProduct::new("Hand Grinder", 45.90, "Conical burr, adjustable", "Kitchen"),
            NewProduct::new("Paper Filters", 4.25, "Pack of 100", "Grocery"),
            NewProduct::new("Travel Tumbler", 19.95, "Vacuum insulated, 450ml", "Outdoor"),
            NewProduct::new("Gift Card", 25.00, "Redeemable online", "Gifts"),
            NewProduct::new("Barista Apron", 28.00, "Waxed canvas", "Apparel"),
            NewProduct::new("Milk Frother", 14.99, "Battery powered", "Kitchen"),
            NewProduct::new("Sample Sachet", 0.0, "Free tasting sample", "Promotions"),
        ]
    }

    fn email(&mut self, first: &str, last: &str) -> String {
        let local: String = format!("{}.{}", first, last)
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
            .collect();
        let local = if local.trim_matches('.').is_empty() {
            format!("user{}", self.rng.random_range(1000..10000))
        } else {
            local
        };
        let domain = *self.pick(FREE_EMAIL_DOMAINS);
        format!("{}@{}", local, domain)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        // Every pool above is non-empty
        &items[self.rng.random_range(0..items.len())]
    }
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Luhn check digit for a payload without its final digit
fn luhn_check_digit(payload: &[u32]) -> u32 {
    let sum: u32 = payload
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    (10 - sum % 10) % 10
}

/// Check a full card number against the Luhn checksum
pub fn luhn_valid(number: &str) -> bool {
    let digits: Option<Vec<u32>> = number.chars().map(|c| c.to_digit(10)).collect();
    match digits {
        Some(digits) if digits.len() > 1 => {
            let (payload, check) = digits.split_at(digits.len() - 1);
            luhn_check_digit(payload) == check[0]
        }
        _ => false,
    }
}
