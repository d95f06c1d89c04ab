use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use chrono::Duration;
use chrono::Utc;
use shop_service::domain::auth::service::AuthService;
use shop_service::domain::business::errors::BusinessError;
use shop_service::domain::business::models::Business;
use shop_service::domain::business::models::BusinessId;
use shop_service::domain::business::models::BusinessName;
use shop_service::domain::business::ports::BusinessRepository;
use shop_service::domain::business::service::BusinessService;
use shop_service::domain::product::errors::ProductError;
use shop_service::domain::product::models::NewProduct;
use shop_service::domain::product::models::Product;
use shop_service::domain::product::models::ProductId;
use shop_service::domain::product::ports::ProductRepository;
use shop_service::domain::product::service::ProductService;
use shop_service::domain::user::errors::UserError;
use shop_service::domain::user::models::EmailAddress;
use shop_service::domain::user::models::NewUser;
use shop_service::domain::user::models::User;
use shop_service::domain::user::models::UserId;
use shop_service::domain::user::models::Username;
use shop_service::domain::user::ports::UserRepository;
use shop_service::domain::user::service::UserService;
use shop_service::domain::verification::errors::DeliveryError;
use shop_service::domain::verification::ports::ConfirmationSender;
use shop_service::domain::verification::service::VerificationGate;
use shop_service::inbound::http::router::create_router;
use shop_service::inbound::http::router::AppState;
use url::Url;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const PASSWORD: &str = "pass_word!";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<InMemoryStore>,
    pub mailbox: Arc<RecordingSender>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryStore::default());
        let mailbox = Arc::new(RecordingSender::default());

        let authenticator = Arc::new(Authenticator::with_handler(jwt_handler()));
        let link_authenticator = Arc::new(Authenticator::with_handler(
            jwt_handler().with_expiration(Duration::hours(24)),
        ));
        let confirmation_url = Url::parse(&format!("{}/verification", address)).unwrap();

        let verification_gate = Arc::new(VerificationGate::new(
            Arc::clone(&store),
            Arc::clone(&mailbox),
            link_authenticator,
            confirmation_url,
        ));

        let state = AppState {
            user_service: Arc::new(UserService::new(
                Arc::clone(&store),
                Arc::clone(&verification_gate),
            )),
            auth_service: Arc::new(AuthService::new(
                Arc::clone(&store),
                Arc::clone(&authenticator),
            )),
            verification_gate,
            business_service: Arc::new(BusinessService::new(Arc::clone(&store))),
            product_service: Arc::new(ProductService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&store),
            )),
        };

        let router = create_router(state);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            store,
            mailbox,
            api_client: reqwest::Client::new(),
            jwt_handler: jwt_handler(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub async fn register(&self, username: &str, email: &str) -> reqwest::Response {
        self.post("/registration")
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": PASSWORD,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn request_token(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/token")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register a user and return an access token for it
    pub async fn signed_up(&self, username: &str) -> String {
        let response = self
            .register(username, &format!("{}@example.com", username))
            .await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = self
            .request_token(username, PASSWORD)
            .await
            .json()
            .await
            .expect("Failed to parse response");

        body["access_token"]
            .as_str()
            .expect("Token response should carry access_token")
            .to_string()
    }
}

fn jwt_handler() -> JwtHandler {
    JwtHandler::from_settings(JWT_SECRET, "HS256", Some(Duration::minutes(30)))
        .expect("Test JWT settings are valid")
}

#[derive(Default)]
struct Tables {
    users: HashMap<i64, User>,
    businesses: HashMap<i64, Business>,
    products: HashMap<i64, Product>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Storage fake enforcing the same uniqueness rules as the Postgres schema
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn user_named(&self, username: &str) -> Option<User> {
        self.tables
            .lock()
            .unwrap()
            .users
            .values()
            .find(|user| user.username.as_str() == username)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut tables = self.tables.lock().unwrap();

        if tables.users.values().any(|u| u.username == user.username)
            || tables
                .businesses
                .values()
                .any(|b| b.name.as_str() == user.username.as_str())
        {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }

        let business_name = BusinessName::new(user.username.as_str().to_string())
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let id = tables.next_id();
        let created = User {
            id: UserId(id),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            is_verified: false,
            joined_at: Utc::now(),
        };
        tables.users.insert(id, created.clone());

        let business_id = tables.next_id();
        tables.businesses.insert(
            business_id,
            Business {
                id: BusinessId(business_id),
                name: business_name,
                city: Business::DEFAULT_LOCATION.to_string(),
                region: Business::DEFAULT_LOCATION.to_string(),
                description: None,
                logo: Business::DEFAULT_LOGO.to_string(),
                owner_id: UserId(id),
            },
        );

        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.tables.lock().unwrap().users.get(&id.0).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self.user_named(username.as_str()))
    }

    async fn mark_verified(&self, id: &UserId) -> Result<bool, UserError> {
        let mut tables = self.tables.lock().unwrap();
        match tables.users.get_mut(&id.0) {
            Some(user) if !user.is_verified => {
                user.is_verified = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl BusinessRepository for InMemoryStore {
    async fn find_by_id(&self, id: &BusinessId) -> Result<Option<Business>, BusinessError> {
        Ok(self.tables.lock().unwrap().businesses.get(&id.0).cloned())
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Option<Business>, BusinessError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .businesses
            .values()
            .find(|b| b.owner_id == *owner_id)
            .cloned())
    }

    async fn update(&self, business: Business) -> Result<Business, BusinessError> {
        let mut tables = self.tables.lock().unwrap();

        if tables
            .businesses
            .values()
            .any(|b| b.id != business.id && b.name == business.name)
        {
            return Err(BusinessError::NameAlreadyExists(
                business.name.as_str().to_string(),
            ));
        }

        match tables.businesses.get_mut(&business.id.0) {
            Some(stored) => {
                *stored = business.clone();
                Ok(business)
            }
            None => Err(BusinessError::NotFound(business.id.to_string())),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn create(&self, product: NewProduct) -> Result<Product, ProductError> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();

        let created = Product {
            id: ProductId(id),
            business_id: product.business_id,
            name: product.name,
            category: product.category,
            original_price: product.original_price,
            new_price: product.new_price,
            percentage_discount: product.percentage_discount,
            offer_expires_on: product.offer_expires_on,
            image: product.image,
            published_at: product.published_at,
        };
        tables.products.insert(id, created.clone());

        Ok(created)
    }

    async fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        let mut products: Vec<Product> = self
            .tables
            .lock()
            .unwrap()
            .products
            .values()
            .cloned()
            .collect();
        products.sort_by(|a, b| b.id.0.cmp(&a.id.0));
        Ok(products)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        Ok(self.tables.lock().unwrap().products.get(&id.0).cloned())
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let mut tables = self.tables.lock().unwrap();
        match tables.products.get_mut(&product.id.0) {
            Some(stored) => {
                *stored = product.clone();
                Ok(product)
            }
            None => Err(ProductError::NotFound(product.id.to_string())),
        }
    }

    async fn delete(&self, id: &ProductId) -> Result<(), ProductError> {
        self.tables
            .lock()
            .unwrap()
            .products
            .remove(&id.0)
            .map(|_| ())
            .ok_or(ProductError::NotFound(id.to_string()))
    }
}

/// Confirmation sender that keeps every link instead of mailing it
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<(EmailAddress, Url)>>,
}

impl RecordingSender {
    pub fn link_for(&self, email: &str) -> Option<Url> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(recipient, _)| recipient.as_str() == email)
            .map(|(_, url)| url.clone())
    }

    /// Token carried by the latest link mailed to `email`.
    pub fn token_for(&self, email: &str) -> Option<String> {
        self.link_for(email)?
            .query_pairs()
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned())
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl ConfirmationSender for RecordingSender {
    async fn send_confirmation(
        &self,
        recipient: &EmailAddress,
        _username: &str,
        confirmation_url: &Url,
    ) -> Result<(), DeliveryError> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.clone(), confirmation_url.clone()));
        Ok(())
    }
}
