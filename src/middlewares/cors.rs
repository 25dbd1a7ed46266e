use actix_cors::Cors;

/// Restricts to `origin` when configured, otherwise mirrors any origin.
pub fn create_cors(origin: Option<&str>) -> Cors {
    let cors = match origin {
        Some(origin) if origin != "*" => Cors::default().allowed_origin(origin),
        _ => Cors::default().allowed_origin_fn(|_, _req_head| true),
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}
