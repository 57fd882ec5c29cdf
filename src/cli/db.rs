use crate::{config, error, store::CatalogStore, success};

pub async fn init_db() {
    let db_path = config::db_path();
    match CatalogStore::open(&db_path) {
        Ok(_) => success!("Database initialized at {}", db_path.display()),
        Err(e) => error!("Cannot initialize database: {}", e),
    }
}

pub async fn recreate_db() {
    let db_path = config::db_path();
    let store = match CatalogStore::open(&db_path) {
        Ok(store) => store,
        Err(e) => error!("Cannot open database: {}", e),
    };

    match store.recreate() {
        Ok(_) => success!("Database recreated at {}", db_path.display()),
        Err(e) => error!("Cannot recreate database: {}", e),
    }
}
