/// Catalog query engine - search, filtering, sorting, and price display
pub mod catalog;

/// Product photo storage on the local filesystem
pub mod images;

/// Batch import of seed data into the store
pub mod import;

/// Order repository - headers, lines, and the aggregate listing
pub mod order;

/// Product repository - typed catalog operations
pub mod product;

/// Login sessions and role-based permissions
pub mod session;

/// User repository - authentication and listings
pub mod user;

/// Editing workflows - permission gates, validation, and photo lifecycle
pub mod workflow;
