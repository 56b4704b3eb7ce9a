//! End-to-end tests for the storefront gateway.
//!
//! Each test spins up mock autos/usuarios/carrito/ordenes services on
//! ephemeral ports, points a gateway at them and drives the gateway router
//! in-process. The mocks record every mutating request so the tests can
//! assert what actually went over the wire.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, post},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use url::Url;

use autotienda_storefront::config::{ServiceUrls, StorefrontConfig};
use autotienda_storefront::routes;
use autotienda_storefront::state::AppState;

/// Requests a mock service has seen: (method, path, JSON body if any).
#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<(String, String, Value)>>>);

impl Recorder {
    fn record(&self, method: &str, path: String, body: Value) {
        self.0
            .lock()
            .unwrap()
            .push((method.to_string(), path, body));
    }

    fn calls(&self) -> Vec<(String, String, Value)> {
        self.0.lock().unwrap().clone()
    }
}

/// Bind a mock service router on an ephemeral port.
async fn spawn_service(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn a4() -> Value {
    json!({
        "id": 9, "marca": "Audi", "modelo": "A4", "anio": 2021,
        "precio": 60_000, "categoria": "Sedán", "stock": 3
    })
}

fn ana() -> Value {
    json!({ "id": 7, "nombre": "Ana", "email": "ana@ejemplo.cl", "rol": "USER" })
}

/// Mock autos service: one real car plus one legacy sentinel row.
fn mock_autos() -> Router {
    async fn list() -> Json<Value> {
        Json(json!([
            {
                "id": 9, "marca": "Audi", "modelo": "A4", "anio": 2021,
                "precio": 60_000, "categoria": "Sedán", "stock": 3
            },
            { "id": 99, "marca": "Z-Admin", "modelo": "Base", "categoria": "Eléctrico" }
        ]))
    }
    async fn get_one(Path(id): Path<i64>) -> axum::response::Response {
        if id == 9 {
            Json(a4()).into_response()
        } else {
            StatusCode::NOT_FOUND.into_response()
        }
    }
    Router::new()
        .route("/api/autos", get(list))
        .route("/api/autos/{id}", get(get_one))
}

/// Mock usuarios service recording every request.
fn mock_usuarios(recorder: Recorder) -> Router {
    async fn login(
        State(recorder): State<Recorder>,
        Json(body): Json<Value>,
    ) -> axum::response::Response {
        recorder.record("POST", "/api/usuarios/login".to_string(), body.clone());
        if body["email"] == "ana@ejemplo.cl" && body["password"] == "secreta" {
            Json(ana()).into_response()
        } else {
            (StatusCode::UNAUTHORIZED, Json(json!({"error": "credenciales"}))).into_response()
        }
    }
    async fn register(
        State(recorder): State<Recorder>,
        Json(body): Json<Value>,
    ) -> axum::response::Response {
        recorder.record("POST", "/api/usuarios/registrar".to_string(), body.clone());
        if body["email"] == "ana@ejemplo.cl" {
            (StatusCode::CONFLICT, Json(json!({"error": "duplicado"}))).into_response()
        } else {
            Json(json!({
                "id": 8, "nombre": body["nombre"], "email": body["email"], "rol": "USER"
            }))
            .into_response()
        }
    }
    async fn list() -> Json<Value> {
        Json(json!([{ "id": 7, "nombre": "Ana", "email": "ana@ejemplo.cl", "rol": "USER" }]))
    }
    Router::new()
        .route("/api/usuarios", get(list))
        .route("/api/usuarios/login", post(login))
        .route("/api/usuarios/registrar", post(register))
        .with_state(recorder)
}

/// Mock carrito service: user 7 has one line of two Audi A4s.
///
/// The mock is stateless; mutations are recorded and acknowledged but the
/// line set never changes, which is exactly what the server-confirmed
/// re-fetch semantics should surface.
fn mock_carrito(recorder: Recorder) -> Router {
    async fn lines(
        State(recorder): State<Recorder>,
        Path(user_id): Path<i64>,
    ) -> axum::response::Response {
        recorder.record("GET", format!("/api/carrito/{user_id}"), Value::Null);
        if user_id == 7 {
            Json(json!([{ "id": 31, "userId": 7, "autoId": 9, "cantidad": 2 }])).into_response()
        } else {
            StatusCode::NOT_FOUND.into_response()
        }
    }
    async fn update(
        State(recorder): State<Recorder>,
        Path(line_id): Path<i64>,
        Json(body): Json<Value>,
    ) -> StatusCode {
        recorder.record("PUT", format!("/api/carrito/{line_id}"), body);
        StatusCode::OK
    }
    async fn remove(
        State(recorder): State<Recorder>,
        Path(line_id): Path<i64>,
    ) -> StatusCode {
        recorder.record("DELETE", format!("/api/carrito/{line_id}"), Value::Null);
        StatusCode::NO_CONTENT
    }
    async fn clear(
        State(recorder): State<Recorder>,
        Path(user_id): Path<i64>,
    ) -> StatusCode {
        recorder.record("DELETE", format!("/api/carrito/vaciar/{user_id}"), Value::Null);
        StatusCode::NO_CONTENT
    }
    Router::new()
        .route("/api/carrito/{id}", get(lines).put(update).delete(remove))
        .route("/api/carrito/vaciar/{userId}", delete(clear))
        .with_state(recorder)
}

/// Mock ordenes service recording submitted orders.
fn mock_ordenes(recorder: Recorder) -> Router {
    async fn create(
        State(recorder): State<Recorder>,
        Json(body): Json<Value>,
    ) -> StatusCode {
        recorder.record("POST", "/api/ordenes".to_string(), body);
        StatusCode::CREATED
    }
    async fn list() -> Json<Value> {
        Json(json!([]))
    }
    Router::new()
        .route("/api/ordenes", get(list).post(create))
        .with_state(recorder)
}

struct Mocks {
    usuarios: Recorder,
    carrito: Recorder,
    ordenes: Recorder,
}

fn config_for(autos: &str, usuarios: &str, carrito: &str, ordenes: &str) -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        services: ServiceUrls {
            autos: Url::parse(&format!("{autos}/api/autos")).unwrap(),
            usuarios: Url::parse(&format!("{usuarios}/api/usuarios")).unwrap(),
            carrito: Url::parse(&format!("{carrito}/api/carrito")).unwrap(),
            ordenes: Url::parse(&format!("{ordenes}/api/ordenes")).unwrap(),
        },
        session_days: 1,
    }
}

/// Spin up all four mocks and a gateway router wired to them.
async fn gateway() -> (Router, Mocks) {
    let mocks = Mocks {
        usuarios: Recorder::default(),
        carrito: Recorder::default(),
        ordenes: Recorder::default(),
    };

    let autos = spawn_service(mock_autos()).await;
    let usuarios = spawn_service(mock_usuarios(mocks.usuarios.clone())).await;
    let carrito = spawn_service(mock_carrito(mocks.carrito.clone())).await;
    let ordenes = spawn_service(mock_ordenes(mocks.ordenes.clone())).await;

    let app = routes::app(AppState::new(config_for(&autos, &usuarios, &carrito, &ordenes)));
    (app, mocks)
}

/// A gateway with the standard autos/usuarios/ordenes mocks but a
/// caller-supplied carrito service, for exercising cart failure paths.
async fn gateway_with_carrito(carrito: Router) -> Router {
    let autos = spawn_service(mock_autos()).await;
    let usuarios = spawn_service(mock_usuarios(Recorder::default())).await;
    let carrito = spawn_service(carrito).await;
    let ordenes = spawn_service(mock_ordenes(Recorder::default())).await;

    routes::app(AppState::new(config_for(&autos, &usuarios, &carrito, &ordenes)))
}

fn request(method: &str, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

struct Reply {
    status: StatusCode,
    cookie: Option<String>,
    location: Option<String>,
    body: Value,
}

async fn send(app: &Router, req: Request<Body>) -> Reply {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Reply {
        status,
        cookie,
        location,
        body,
    }
}

/// Sign Ana in and return her session cookie.
async fn login_ana(app: &Router) -> String {
    let reply = send(
        app,
        request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "ana@ejemplo.cl", "password": "secreta" })),
        ),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    reply.cookie.expect("login must set a session cookie")
}

/// Sign the hardcoded administrator in and return the session cookie.
async fn login_admin(app: &Router) -> String {
    let reply = send(
        app,
        request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "admin@tienda.com", "password": "admin123" })),
        ),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    reply.cookie.expect("login must set a session cookie")
}

#[tokio::test]
async fn health_answers_ok() {
    let (app, _mocks) = gateway().await;
    let reply = send(&app, request("GET", "/health", None, None)).await;
    assert_eq!(reply.status, StatusCode::OK);
}

#[tokio::test]
async fn admin_bypass_never_reaches_the_usuarios_service() {
    let (app, mocks) = gateway().await;

    let reply = send(
        &app,
        request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "Admin@Tienda.com", "password": "admin123" })),
        ),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["mensaje"], "Bienvenido Administrador");
    assert_eq!(reply.body["usuario"]["id"], 0);
    assert_eq!(reply.body["usuario"]["rol"], "ADMIN");
    assert!(mocks.usuarios.calls().is_empty());
}

#[tokio::test]
async fn bad_credentials_surface_the_credentials_message() {
    let (app, _mocks) = gateway().await;

    let reply = send(
        &app,
        request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "ana@ejemplo.cl", "password": "equivocada" })),
        ),
    )
    .await;

    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["error"], "Email o contraseña incorrectos.");
}

#[tokio::test]
async fn register_rejects_mismatched_passwords_locally() {
    let (app, mocks) = gateway().await;

    let reply = send(
        &app,
        request(
            "POST",
            "/auth/register",
            None,
            Some(json!({
                "nombre": "Beto", "email": "beto@ejemplo.cl",
                "password": "uno", "confirmarPassword": "dos"
            })),
        ),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "Las contraseñas no coinciden.");
    assert!(mocks.usuarios.calls().is_empty());
}

#[tokio::test]
async fn register_reports_duplicate_emails() {
    let (app, _mocks) = gateway().await;

    let reply = send(
        &app,
        request(
            "POST",
            "/auth/register",
            None,
            Some(json!({
                "nombre": "Ana", "email": "ana@ejemplo.cl",
                "password": "secreta", "confirmarPassword": "secreta"
            })),
        ),
    )
    .await;

    assert_eq!(reply.status, StatusCode::CONFLICT);
    assert_eq!(
        reply.body["error"],
        "El correo electrónico ya se encuentra registrado."
    );
}

#[tokio::test]
async fn catalog_hides_sentinels_but_counts_their_category() {
    let (app, _mocks) = gateway().await;

    let reply = send(&app, request("GET", "/catalog", None, None)).await;

    assert_eq!(reply.status, StatusCode::OK);
    let categorias: Vec<&str> = reply.body["categorias"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap())
        .collect();
    assert_eq!(categorias[0], "Todos");
    assert!(categorias.contains(&"Eléctrico"));

    let productos = reply.body["productos"].as_array().unwrap();
    assert_eq!(productos.len(), 1);
    assert_eq!(productos[0]["marca"], "Audi");
}

#[tokio::test]
async fn catalog_filters_by_category() {
    let (app, _mocks) = gateway().await;

    let reply = send(
        &app,
        request("GET", "/catalog?categoria=Deportivo", None, None),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["categoria_seleccionada"], "Deportivo");
    assert!(reply.body["productos"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn adding_to_cart_requires_login() {
    let (app, _mocks) = gateway().await;

    let reply = send(&app, request("POST", "/catalog/9/add", None, None)).await;

    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        reply.body["error"],
        "Debes iniciar sesión para agregar productos al carrito."
    );
}

#[tokio::test]
async fn cart_requires_login() {
    let (app, _mocks) = gateway().await;
    let reply = send(&app, request("GET", "/cart", None, None)).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["error"], "Debes iniciar sesión.");
}

#[tokio::test]
async fn cart_joins_lines_with_products_and_formats_the_total() {
    let (app, _mocks) = gateway().await;
    let cookie = login_ana(&app).await;

    let reply = send(&app, request("GET", "/cart", Some(&cookie), None)).await;

    assert_eq!(reply.status, StatusCode::OK);
    let items = reply.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["producto"], "Audi A4");
    assert_eq!(items[0]["cantidad"], 2);
    assert_eq!(reply.body["total"], 120_000);
    assert_eq!(reply.body["total_display"], "$120.000");
    assert_eq!(reply.body["mensaje"], Value::Null);
}

#[tokio::test]
async fn lines_whose_product_lookup_fails_are_dropped_from_the_view() {
    // User 7's cart holds one resolvable line and one referencing a
    // product the catalog no longer has.
    async fn lines(Path(user_id): Path<i64>) -> axum::response::Response {
        if user_id == 7 {
            Json(json!([
                { "id": 31, "userId": 7, "autoId": 9, "cantidad": 2 },
                { "id": 32, "userId": 7, "autoId": 77, "cantidad": 1 }
            ]))
            .into_response()
        } else {
            StatusCode::NOT_FOUND.into_response()
        }
    }
    let carrito = Router::new().route("/api/carrito/{id}", get(lines));
    let app = gateway_with_carrito(carrito).await;
    let cookie = login_ana(&app).await;

    let reply = send(&app, request("GET", "/cart", Some(&cookie), None)).await;

    assert_eq!(reply.status, StatusCode::OK);
    let items = reply.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["auto_id"], 9);
    assert_eq!(reply.body["total"], 120_000);
}

#[tokio::test]
async fn failed_removal_surfaces_an_error_and_keeps_the_line() {
    async fn lines(Path(user_id): Path<i64>) -> axum::response::Response {
        if user_id == 7 {
            Json(json!([{ "id": 31, "userId": 7, "autoId": 9, "cantidad": 2 }])).into_response()
        } else {
            StatusCode::NOT_FOUND.into_response()
        }
    }
    async fn broken_remove(Path(_id): Path<i64>) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
    let carrito = Router::new().route("/api/carrito/{id}", get(lines).delete(broken_remove));
    let app = gateway_with_carrito(carrito).await;
    let cookie = login_ana(&app).await;

    let reply = send(&app, request("DELETE", "/cart/lines/31", Some(&cookie), None)).await;
    assert_eq!(reply.status, StatusCode::BAD_GATEWAY);
    assert_eq!(reply.body["error"], "Servicio no disponible. Intente de nuevo.");

    // The line is still part of the cart.
    let cart = send(&app, request("GET", "/cart", Some(&cookie), None)).await;
    assert_eq!(cart.body["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart.body["items"][0]["line_id"], 31);
}

#[tokio::test]
async fn zero_quantity_is_rejected_without_an_upstream_call() {
    let (app, mocks) = gateway().await;
    let cookie = login_ana(&app).await;

    let reply = send(
        &app,
        request(
            "PUT",
            "/cart/lines/31",
            Some(&cookie),
            Some(json!({ "cantidad": 0 })),
        ),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "La cantidad debe ser al menos 1.");
    assert!(
        mocks
            .carrito
            .calls()
            .iter()
            .all(|(method, _, _)| method != "PUT")
    );
}

#[tokio::test]
async fn quantity_updates_return_server_confirmed_state() {
    let (app, mocks) = gateway().await;
    let cookie = login_ana(&app).await;

    let reply = send(
        &app,
        request(
            "PUT",
            "/cart/lines/31",
            Some(&cookie),
            Some(json!({ "cantidad": 3 })),
        ),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    let puts: Vec<_> = mocks
        .carrito
        .calls()
        .into_iter()
        .filter(|(method, _, _)| method == "PUT")
        .collect();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].1, "/api/carrito/31");
    assert_eq!(puts[0].2["cantidad"], 3);

    // The stateless mock never applied the update; the response reflects
    // what the service confirmed, not what was requested.
    assert_eq!(reply.body["items"][0]["cantidad"], 2);
    assert_eq!(reply.body["total"], 120_000);
}

#[tokio::test]
async fn removing_a_line_targets_exactly_that_line() {
    let (app, mocks) = gateway().await;
    let cookie = login_ana(&app).await;

    let reply = send(&app, request("DELETE", "/cart/lines/31", Some(&cookie), None)).await;

    assert_eq!(reply.status, StatusCode::OK);
    let deleted = mocks
        .carrito
        .calls()
        .iter()
        .any(|(method, path, _)| method == "DELETE" && path == "/api/carrito/31");
    assert!(deleted);
}

#[tokio::test]
async fn checkout_prefills_and_locks_the_identity_fields() {
    let (app, _mocks) = gateway().await;
    let cookie = login_ana(&app).await;

    let begin = send(&app, request("POST", "/cart/checkout", Some(&cookie), None)).await;
    assert_eq!(begin.status, StatusCode::OK);

    let reply = send(&app, request("GET", "/checkout", Some(&cookie), None)).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["entrega"]["nombre"], "Ana");
    assert_eq!(reply.body["entrega"]["correo"], "ana@ejemplo.cl");
    assert_eq!(reply.body["bloqueados"], json!(["nombre", "correo"]));
    assert_eq!(reply.body["total_display"], "$120.000");
}

#[tokio::test]
async fn checkout_form_requires_the_address_fields() {
    let (app, _mocks) = gateway().await;
    let cookie = login_ana(&app).await;

    let begin = send(&app, request("POST", "/cart/checkout", Some(&cookie), None)).await;
    assert_eq!(begin.status, StatusCode::OK);
    assert_eq!(begin.body["siguiente"], "/checkout");

    let reply = send(
        &app,
        request(
            "POST",
            "/checkout",
            Some(&cookie),
            Some(json!({ "nombre": "Ana", "correo": "ana@ejemplo.cl" })),
        ),
    )
    .await;

    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(reply.body["error"], "Revisa los campos marcados.");
    assert_eq!(reply.body["fields"]["apellido"], "El apellido es obligatorio.");
    assert_eq!(reply.body["fields"]["calle"], "La calle es obligatoria.");
    assert_eq!(reply.body["fields"]["region"], "La región es obligatoria.");
    assert_eq!(reply.body["fields"]["comuna"], "La comuna es obligatoria.");
}

#[tokio::test]
async fn receipt_redirects_home_when_the_pipeline_is_empty() {
    let (app, _mocks) = gateway().await;
    let cookie = login_ana(&app).await;

    let reply = send(&app, request("GET", "/receipt", Some(&cookie), None)).await;

    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/"));
}

#[tokio::test]
async fn full_purchase_submits_the_order_and_clears_the_cart() {
    let (app, mocks) = gateway().await;
    let cookie = login_ana(&app).await;

    let begin = send(&app, request("POST", "/cart/checkout", Some(&cookie), None)).await;
    assert_eq!(begin.status, StatusCode::OK);
    assert_eq!(begin.body["total"], 120_000);
    assert_eq!(begin.body["total_display"], "$120.000");

    let form = send(
        &app,
        request(
            "POST",
            "/checkout",
            Some(&cookie),
            Some(json!({
                "nombre": "Ana", "apellido": "Rojas", "correo": "ana@ejemplo.cl",
                "calle": "Av. Siempre Viva 123", "region": "RM", "comuna": "Providencia"
            })),
        ),
    )
    .await;
    assert_eq!(form.status, StatusCode::OK);
    assert_eq!(form.body["siguiente"], "/receipt");

    let receipt = send(&app, request("GET", "/receipt", Some(&cookie), None)).await;
    assert_eq!(receipt.status, StatusCode::OK);
    assert_eq!(receipt.body["total_display"], "$120.000");
    assert_eq!(receipt.body["entrega"]["apellido"], "Rojas");
    let transaccion = receipt.body["transaccion"].as_str().unwrap().to_string();
    assert!(!transaccion.is_empty());

    // Reloading the receipt keeps the same reference.
    let reload = send(&app, request("GET", "/receipt", Some(&cookie), None)).await;
    assert_eq!(reload.body["transaccion"], transaccion.as_str());

    let confirm = send(&app, request("POST", "/receipt/confirm", Some(&cookie), None)).await;
    assert_eq!(confirm.status, StatusCode::OK);
    assert_eq!(
        confirm.body["mensaje"],
        "Compra realizada con éxito. Gracias por su preferencia."
    );
    assert_eq!(confirm.body["transaccion"], transaccion.as_str());

    let orders = mocks.ordenes.calls();
    assert_eq!(orders.len(), 1);
    let order = &orders[0].2;
    assert_eq!(order["userId"], 7);
    assert_eq!(order["nombreCliente"], "Ana Rojas");
    assert_eq!(order["correoCliente"], "ana@ejemplo.cl");
    assert_eq!(order["total"], 120_000);
    assert_eq!(order["items"][0]["autoId"], 9);
    assert_eq!(order["items"][0]["marcaModelo"], "Audi A4");
    assert_eq!(order["items"][0]["precioUnitario"], 60_000);
    assert_eq!(order["items"][0]["cantidad"], 2);
    assert_eq!(order["calle"], "Av. Siempre Viva 123");

    let cleared = mocks
        .carrito
        .calls()
        .iter()
        .any(|(method, path, _)| method == "DELETE" && path == "/api/carrito/vaciar/7");
    assert!(cleared);

    // The pipeline keys are gone; a second visit goes home.
    let replay = send(&app, request("GET", "/receipt", Some(&cookie), None)).await;
    assert_eq!(replay.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn admin_routes_reject_regular_users() {
    let (app, _mocks) = gateway().await;
    let cookie = login_ana(&app).await;

    let reply = send(&app, request("GET", "/admin/dashboard", Some(&cookie), None)).await;

    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    assert_eq!(reply.body["error"], "Requiere rol de administrador.");
}

#[tokio::test]
async fn admin_dashboard_aggregates_the_collections() {
    let (app, _mocks) = gateway().await;
    let cookie = login_admin(&app).await;

    let reply = send(&app, request("GET", "/admin/dashboard", Some(&cookie), None)).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["total_ordenes"], 0);
    assert_eq!(reply.body["total_productos"], 1);
    assert_eq!(reply.body["inventario"], 3);
    assert_eq!(reply.body["total_usuarios"], 1);
}

#[tokio::test]
async fn admin_cannot_delete_a_base_category() {
    let (app, _mocks) = gateway().await;
    let cookie = login_admin(&app).await;

    let reply = send(
        &app,
        request("DELETE", "/admin/categories/Sed%C3%A1n", Some(&cookie), None),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "No puedes eliminar una categoría base.");
}

#[tokio::test]
async fn admin_category_lifecycle() {
    let (app, _mocks) = gateway().await;
    let cookie = login_admin(&app).await;

    let created = send(
        &app,
        request(
            "POST",
            "/admin/categories",
            Some(&cookie),
            Some(json!({ "nombre": "Camioneta" })),
        ),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);

    // Case-insensitive duplicate
    let duplicate = send(
        &app,
        request(
            "POST",
            "/admin/categories",
            Some(&cookie),
            Some(json!({ "nombre": "camioneta" })),
        ),
    )
    .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    // Names a sentinel row already provides cannot be registered either
    let sentinel = send(
        &app,
        request(
            "POST",
            "/admin/categories",
            Some(&cookie),
            Some(json!({ "nombre": "Eléctrico" })),
        ),
    )
    .await;
    assert_eq!(sentinel.status, StatusCode::CONFLICT);

    let removed = send(
        &app,
        request("DELETE", "/admin/categories/Camioneta", Some(&cookie), None),
    )
    .await;
    assert_eq!(removed.status, StatusCode::OK);

    let missing = send(
        &app,
        request("DELETE", "/admin/categories/Camioneta", Some(&cookie), None),
    )
    .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn contact_messages_reach_the_admin_dashboard() {
    let (app, _mocks) = gateway().await;

    let sent = send(
        &app,
        request(
            "POST",
            "/contact",
            None,
            Some(json!({
                "name": "Carla", "email": "carla@ejemplo.cl",
                "message": "Quisiera agendar una prueba de manejo."
            })),
        ),
    )
    .await;
    assert_eq!(sent.status, StatusCode::OK);

    let invalid = send(
        &app,
        request(
            "POST",
            "/contact",
            None,
            Some(json!({ "name": "", "email": "sin-arroba", "message": "" })),
        ),
    )
    .await;
    assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);

    let cookie = login_admin(&app).await;
    let dashboard = send(&app, request("GET", "/admin/dashboard", Some(&cookie), None)).await;
    let mensajes = dashboard.body["mensajes_contacto"].as_array().unwrap();
    assert_eq!(mensajes.len(), 1);
    assert_eq!(mensajes[0]["name"], "Carla");
}

#[tokio::test]
async fn logout_discards_the_session() {
    let (app, _mocks) = gateway().await;
    let cookie = login_ana(&app).await;

    let out = send(&app, request("POST", "/auth/logout", Some(&cookie), None)).await;
    assert_eq!(out.status, StatusCode::NO_CONTENT);

    let reply = send(&app, request("GET", "/cart", Some(&cookie), None)).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}
