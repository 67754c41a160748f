//! HTTP server layer for the catalog API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │      /allProducts  /brand  /product  /update  /cart  ...        │
//! │                                                                 │
//! │  ┌─────────────┐  ┌──────────────┐  ┌────────────────────────┐  │
//! │  │  handlers   │  │  validation  │  │        routes          │  │
//! │  │ (requests)  │  │ (body checks)│  │   (router config)      │  │
//! │  └─────────────┘  └──────────────┘  └────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;
pub mod validation;

pub use handlers::{
    add_cart_entry_handler, add_product_handler, all_products_handler, cart_handler,
    health_handler, product_handler, products_by_brand_handler, update_product_handler, AppState,
    ErrorResponse, HealthResponse,
};
pub use routes::{create_router, create_shared_router, RouterConfig};
pub use validation::{parse_object_id, ProductUpdate, PRODUCT_UPDATE_FIELDS};
