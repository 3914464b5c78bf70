use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use async_trait::async_trait;
use feedgrid::{FetchError, Item, Page};

use crate::envelope::{decode_page, encode_page};
use crate::source::PageSource;

const ID_BASE: u64 = 100_000;

struct Template {
    title: &'static str,
    image: &'static str,
    category: &'static str,
    minutes: u32,
}

const TEMPLATES: [Template; 5] = [
    Template {
        title: "Tomato scrambled eggs",
        image: "https://img.example/recipes/tomato-eggs.jpg",
        category: "Home cooking",
        minutes: 15,
    },
    Template {
        title: "Seaweed egg soup",
        image: "https://img.example/recipes/seaweed-soup.jpg",
        category: "Soup",
        minutes: 10,
    },
    Template {
        title: "Braised pork belly",
        image: "https://img.example/recipes/braised-pork.jpg",
        category: "Home cooking",
        minutes: 60,
    },
    Template {
        title: "Kung pao chicken",
        image: "https://img.example/recipes/kung-pao.jpg",
        category: "Sichuan",
        minutes: 25,
    },
    Template {
        title: "Mapo tofu",
        image: "https://img.example/recipes/mapo-tofu.jpg",
        category: "Sichuan",
        minutes: 20,
    },
];

const AUTHORS: [&str; 7] = [
    "Food lover",
    "Master chef",
    "Home cook",
    "Professional chef",
    "Food blogger",
    "Beginner cook",
    "Cuisine expert",
];

/// The featured cards served as page 1.
fn presets() -> [Item; 4] {
    let preset = |id: &str, t: &Template, author: &str, minutes: u32, likes: u32| Item {
        id: id.to_owned(),
        title: t.title.to_owned(),
        image_url: t.image.to_owned(),
        author_name: author.to_owned(),
        category: t.category.to_owned(),
        estimated_duration_minutes: minutes,
        popularity_score: likes,
    };
    [
        preset("recipe-1", &TEMPLATES[0], AUTHORS[0], 15, 568),
        preset("recipe-2", &TEMPLATES[1], AUTHORS[0], 10, 723),
        preset("preset-3", &TEMPLATES[3], "Gourmet", 20, 489),
        preset("preset-4", &TEMPLATES[2], "Gourmet", 60, 356),
    ]
}

fn mix(seed: u64) -> u64 {
    // splitmix64 finalizer
    let mut z = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// The generated item for `seed`. Identical seeds always give identical content.
pub fn generated_item(seed: u64) -> Item {
    let template = &TEMPLATES[(seed % TEMPLATES.len() as u64) as usize];
    Item {
        id: format!("recipe-{}", ID_BASE + seed),
        title: template.title.to_owned(),
        image_url: template.image.to_owned(),
        author_name: AUTHORS[(seed % AUTHORS.len() as u64) as usize].to_owned(),
        category: template.category.to_owned(),
        estimated_duration_minutes: template.minutes,
        popularity_score: 100 + (mix(seed) % 900) as u32,
    }
}

/// Looks up any item the fixture can serve by id, e.g. for a detail view.
pub fn item_for_id(id: &str) -> Option<Item> {
    if let Some(item) = presets().into_iter().find(|it| it.id == id) {
        return Some(item);
    }
    let n: u64 = id.strip_prefix("recipe-")?.parse().ok()?;
    let seed = n.checked_sub(ID_BASE)?;
    Some(generated_item(seed))
}

/// A deterministic in-memory [`PageSource`].
///
/// Page 1 always serves the four featured presets, whatever the limit; every later page `p`
/// serves ids `recipe-{100000 + p * limit + i}`. Pages round-trip through the JSON envelope so
/// the decode path is exercised exactly as with a real server.
#[derive(Debug)]
pub struct FixtureSource {
    max_pages: u32,
    calls: Cell<usize>,
    failures: RefCell<VecDeque<FetchError>>,
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new(10)
    }
}

impl FixtureSource {
    /// Serves pages `1..=max_pages`; page `max_pages` reports `has_more = false`.
    pub fn new(max_pages: u32) -> Self {
        Self {
            max_pages,
            calls: Cell::new(0),
            failures: RefCell::new(VecDeque::new()),
        }
    }

    /// Number of `fetch_page` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Makes the next fetch fail with `error`. Queued failures are served in order.
    pub fn fail_next(&self, error: FetchError) {
        self.failures.borrow_mut().push_back(error);
    }

    pub fn page(&self, page_number: u32, limit: u32) -> Page {
        let items = if page_number <= 1 {
            Vec::from(presets())
        } else {
            let base = page_number as u64 * limit as u64;
            (0..limit as u64).map(|i| generated_item(base + i)).collect()
        };
        Page {
            page_number,
            items,
            has_more: page_number < self.max_pages,
        }
    }
}

#[async_trait(?Send)]
impl PageSource for FixtureSource {
    async fn fetch_page(&self, page_number: u32, limit: u32) -> Result<Page, FetchError> {
        self.calls.set(self.calls.get() + 1);
        if let Some(error) = self.failures.borrow_mut().pop_front() {
            return Err(error);
        }
        let body = encode_page(&self.page(page_number, limit))?;
        decode_page(page_number, &body)
    }
}
