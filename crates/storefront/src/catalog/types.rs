//! Domain and wire types for the catalog API.
//!
//! Wire types mirror the API's JSON shape exactly; [`Product`] is the
//! normalized record the rest of the crate consumes. Conversion between the
//! two lives in the `conversions` module.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use souq_core::{Price, ProductId};

// =============================================================================
// Domain Types
// =============================================================================

/// A normalized catalog product.
///
/// Read-only: created by a catalog fetch, replaced wholesale by the next
/// fetch, never mutated in place and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Localized display name.
    pub name_localized: String,
    /// Description.
    pub description: String,
    /// Localized description.
    pub description_localized: String,
    /// Unit price (non-negative).
    pub price: Price,
    /// Discount percentage, 0-100. Absent upstream means 0.
    pub discount_percentage: Decimal,
    /// Primary image URL.
    pub image: String,
    /// Gallery image URLs.
    pub images: Vec<String>,
    /// Category tag.
    pub category: String,
    /// Rating, 0-5.
    pub rating: f64,
    /// Whether the product has stock.
    pub in_stock: bool,
    /// Whether the product is flagged as new.
    pub is_new: bool,
    /// Whether the product is featured (rating at or above the threshold).
    pub is_featured: bool,
}

/// A browsable category with display metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Category slug, as used by the catalog API.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Localized display name.
    pub name_localized: &'static str,
    /// Display icon.
    pub icon: &'static str,
}

/// The fixed set of categories the storefront exposes.
///
/// The leading "all" entry is a UI pseudo-category, not an API slug.
pub const CATEGORIES: &[Category] = &[
    Category {
        id: "all",
        name: "All Categories",
        name_localized: "جميع الفئات",
        icon: "📦",
    },
    Category {
        id: "smartphones",
        name: "Smartphones",
        name_localized: "الهواتف الذكية",
        icon: "📱",
    },
    Category {
        id: "laptops",
        name: "Laptops",
        name_localized: "أجهزة الكمبيوتر المحمولة",
        icon: "💻",
    },
    Category {
        id: "fragrances",
        name: "Fragrances",
        name_localized: "العطور",
        icon: "🌸",
    },
    Category {
        id: "groceries",
        name: "Groceries",
        name_localized: "البقالة",
        icon: "🛒",
    },
    Category {
        id: "home-decoration",
        name: "Home Decoration",
        name_localized: "ديكور المنزل",
        icon: "🏠",
    },
    Category {
        id: "furniture",
        name: "Furniture",
        name_localized: "الأثاث",
        icon: "🪑",
    },
    Category {
        id: "tops",
        name: "Tops",
        name_localized: "الملابس العلوية",
        icon: "👕",
    },
    Category {
        id: "womens-dresses",
        name: "Women's Dresses",
        name_localized: "فساتين نسائية",
        icon: "👗",
    },
    Category {
        id: "womens-shoes",
        name: "Women's Shoes",
        name_localized: "أحذية نسائية",
        icon: "👠",
    },
    Category {
        id: "mens-shirts",
        name: "Men's Shirts",
        name_localized: "قمصان رجالية",
        icon: "👔",
    },
    Category {
        id: "mens-shoes",
        name: "Men's Shoes",
        name_localized: "أحذية رجالية",
        icon: "👞",
    },
    Category {
        id: "mens-watches",
        name: "Men's Watches",
        name_localized: "ساعات رجالية",
        icon: "⌚",
    },
    Category {
        id: "womens-watches",
        name: "Women's Watches",
        name_localized: "ساعات نسائية",
        icon: "⌚",
    },
    Category {
        id: "womens-bags",
        name: "Women's Bags",
        name_localized: "حقائب نسائية",
        icon: "👜",
    },
    Category {
        id: "womens-jewellery",
        name: "Women's Jewellery",
        name_localized: "مجوهرات نسائية",
        icon: "💍",
    },
    Category {
        id: "sunglasses",
        name: "Sunglasses",
        name_localized: "نظارات شمسية",
        icon: "🕶️",
    },
    Category {
        id: "motorcycle",
        name: "Motorcycle",
        name_localized: "دراجات نارية",
        icon: "🏍️",
    },
];

// =============================================================================
// Wire Types
// =============================================================================

/// A product record as returned by the catalog API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiProduct {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub discount_percentage: Option<Decimal>,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: i64,
}

/// The list envelope returned by `/products`, `/products/category/{c}`, and
/// `/products/search`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiProductList {
    pub products: Vec<ApiProduct>,
}
