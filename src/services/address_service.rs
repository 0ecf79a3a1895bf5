use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseTransaction, EntityTrait, QuerySelect, Set, TransactionTrait,
};
use sea_orm::sea_query::LockType;
use uuid::Uuid;

use crate::{
    dto::addresses::{AddAddressRequest, AddressBookResponse, UpdateAddressRequest},
    entity::users::{ActiveModel as UserActive, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{AddressBook, AddressList},
    response::{ApiResponse, Meta},
    state::AppState,
};

fn book_of(user: &UserModel) -> AddressBook {
    AddressBook::new(user.addresses.0.clone(), user.default_address_id)
}

async fn lock_user(txn: &DatabaseTransaction, user_id: Uuid) -> AppResult<UserModel> {
    Users::find_by_id(user_id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::not_found("User"))
}

async fn save_book(
    txn: &DatabaseTransaction,
    user: UserModel,
    book: AddressBook,
) -> AppResult<AddressBook> {
    let mut active: UserActive = user.into();
    active.addresses = Set(AddressList(book.addresses.clone()));
    active.default_address_id = Set(book.default_address_id);
    active.updated_at = Set(Utc::now().into());
    active.update(txn).await?;
    Ok(book)
}

/// Run `change` against the caller's address book with the user row locked.
async fn mutate_book<F>(state: &AppState, user_id: Uuid, change: F) -> AppResult<AddressBook>
where
    F: FnOnce(&mut AddressBook) -> AppResult<()>,
{
    let txn = state.orm.begin().await?;
    let user = lock_user(&txn, user_id).await?;
    let mut book = book_of(&user);
    change(&mut book)?;
    let book = save_book(&txn, user, book).await?;
    txn.commit().await?;
    Ok(book)
}

pub async fn list_addresses(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<AddressBookResponse>> {
    let model = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    Ok(ApiResponse::success(
        "Addresses",
        book_of(&model).into(),
        Some(Meta::empty()),
    ))
}

pub async fn add_address(
    state: &AppState,
    user: &AuthUser,
    payload: AddAddressRequest,
) -> AppResult<ApiResponse<AddressBookResponse>> {
    payload.validate()?;
    let make_default = payload.make_default;
    let address = payload.into_address();
    let book = mutate_book(state, user.user_id, |book| {
        book.add(address, make_default);
        Ok(())
    })
    .await?;
    Ok(ApiResponse::success("Address added", book.into(), Some(Meta::empty())))
}

pub async fn update_address(
    state: &AppState,
    user: &AuthUser,
    address_id: Uuid,
    payload: UpdateAddressRequest,
) -> AppResult<ApiResponse<AddressBookResponse>> {
    payload.validate()?;
    let book = mutate_book(state, user.user_id, |book| {
        book.update(address_id, |address| payload.apply(address))
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Address"))
    })
    .await?;
    Ok(ApiResponse::success("Address updated", book.into(), Some(Meta::empty())))
}

pub async fn delete_address(
    state: &AppState,
    user: &AuthUser,
    address_id: Uuid,
) -> AppResult<ApiResponse<AddressBookResponse>> {
    let book = mutate_book(state, user.user_id, |book| {
        book.remove(address_id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Address"))
    })
    .await?;
    Ok(ApiResponse::success("Address deleted", book.into(), Some(Meta::empty())))
}

pub async fn set_default_address(
    state: &AppState,
    user: &AuthUser,
    address_id: Uuid,
) -> AppResult<ApiResponse<AddressBookResponse>> {
    let book = mutate_book(state, user.user_id, |book| {
        if book.set_default(address_id) {
            Ok(())
        } else {
            Err(AppError::not_found("Address"))
        }
    })
    .await?;
    Ok(ApiResponse::success("Default address set", book.into(), Some(Meta::empty())))
}
