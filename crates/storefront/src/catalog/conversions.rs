//! Product type conversion functions.

use souq_core::{Price, ProductId};

use super::types::{ApiProduct, Product};

/// Rating at or above which a product is flagged as featured.
const FEATURED_RATING_THRESHOLD: f64 = 4.5;

/// Normalize an API product record into a [`Product`].
///
/// Renames `title` to `name`, derives `in_stock` from the stock count,
/// derives `is_featured` from the rating, and defaults an absent discount
/// to zero. The upstream catalog carries no localized fields, so the
/// localized variants reuse the English text.
pub(crate) fn convert_product(api: ApiProduct) -> Product {
    let is_featured = api.rating >= FEATURED_RATING_THRESHOLD;

    Product {
        id: ProductId::new(api.id),
        name: api.title.clone(),
        name_localized: api.title,
        description: api.description.clone(),
        description_localized: api.description,
        price: Price::new(api.price),
        discount_percentage: api.discount_percentage.unwrap_or_default(),
        image: api.thumbnail,
        images: api.images,
        category: api.category,
        rating: api.rating,
        in_stock: api.stock > 0,
        is_new: true,
        is_featured,
    }
}
