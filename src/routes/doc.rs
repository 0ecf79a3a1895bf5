use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        addresses::{AddAddressRequest, AddressBookResponse, UpdateAddressRequest},
        admin::{DashboardStats, SetFeaturedRequest, UpdateOrderStatusRequest, UserList},
        auth::{AuthResponse, GoogleSignInRequest, SignInRequest, SignUpRequest},
        notifications::NotificationList,
        orders::{AddressInput, CreateOrderRequest, LineItemInput, OrderList, OrderWithItems, UpdateOrderRequest},
        payments::{CardInput, PaymentResult, ProcessPaymentRequest},
        products::{CreateProductRequest, ProductDetail, ProductList, UpdateProductRequest},
        reviews::{CreateReviewRequest, ReviewList, UpdateReviewRequest},
        users::UpdateProfileRequest,
        wishlist::{AddWishlistRequest, WishlistProductList},
    },
    error::FieldError,
    middleware::auth::TOKEN_HEADER,
    models::{
        Address, AddressType, AuthProvider, DeliveryAddress, Notification, Order, OrderItem,
        OrderStatus, Payment, PaymentDetails, PaymentMethod, PaymentStatus, Product, RentalUnit,
        RentingTable, Review, ReviewStats, Role, User, UserStatus, WishlistEntry,
    },
    response::{ApiResponse, Deleted, Meta},
    routes::{
        admin, checkout, health, notifications, oauth, params, payments, products, reviews, users,
        wishlist,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(TOKEN_HEADER))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::sign_up,
        users::sign_in,
        users::get_me,
        users::update_me,
        users::delete_me,
        users::list_addresses,
        users::add_address,
        users::update_address,
        users::delete_address,
        users::set_default_address,
        oauth::google_sign_in,
        products::list_products,
        products::list_featured,
        products::get_product,
        products::create_product,
        products::update_product,
        reviews::create_review,
        reviews::update_review,
        reviews::delete_review,
        reviews::list_product_reviews,
        reviews::get_stats,
        checkout::create_order,
        checkout::list_my_orders,
        checkout::get_order,
        checkout::update_order,
        payments::process_payment,
        payments::get_payment_by_order,
        wishlist::list_wishlist,
        wishlist::add_to_wishlist,
        wishlist::remove_from_wishlist,
        notifications::list_notifications,
        notifications::mark_read,
        admin::dashboard,
        admin::list_users,
        admin::ban_user,
        admin::unban_user,
        admin::delete_user,
        admin::list_products,
        admin::update_product,
        admin::delete_product,
        admin::list_all_orders,
        admin::get_order_admin,
        admin::update_order_status,
        admin::get_featured,
        admin::set_featured
    ),
    components(
        schemas(
            User,
            Role,
            UserStatus,
            AuthProvider,
            Address,
            AddressType,
            Product,
            RentingTable,
            RentalUnit,
            Review,
            ReviewStats,
            Order,
            OrderItem,
            OrderStatus,
            DeliveryAddress,
            Payment,
            PaymentMethod,
            PaymentStatus,
            PaymentDetails,
            WishlistEntry,
            Notification,
            FieldError,
            Deleted,
            Meta,
            SignUpRequest,
            SignInRequest,
            GoogleSignInRequest,
            AuthResponse,
            UpdateProfileRequest,
            AddAddressRequest,
            UpdateAddressRequest,
            AddressBookResponse,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            ProductDetail,
            CreateReviewRequest,
            UpdateReviewRequest,
            ReviewList,
            LineItemInput,
            AddressInput,
            CreateOrderRequest,
            UpdateOrderRequest,
            OrderWithItems,
            OrderList,
            CardInput,
            ProcessPaymentRequest,
            PaymentResult,
            AddWishlistRequest,
            WishlistProductList,
            NotificationList,
            DashboardStats,
            UserList,
            UpdateOrderStatusRequest,
            SetFeaturedRequest,
            params::Pagination,
            params::ProductQuery,
            params::OrderListQuery,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>,
            ApiResponse<PaymentResult>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Users", description = "Sign-up, sign-in and profile endpoints"),
        (name = "Addresses", description = "Address book endpoints"),
        (name = "Products", description = "Rental listing endpoints"),
        (name = "Reviews", description = "Product review endpoints"),
        (name = "Orders", description = "Checkout and order endpoints"),
        (name = "Payments", description = "Payment endpoints"),
        (name = "Wishlist", description = "Wishlist endpoints"),
        (name = "Notifications", description = "Notification endpoints"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
