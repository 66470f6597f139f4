//! Product API Handlers

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use futures::future::try_join_all;
use serde::Deserialize;
use surrealdb::sql::Thing;

use crate::auth::{CurrentUser, ensure_owner_or_admin, require_seller};
use crate::core::ServerState;
use crate::db::models::{
    ProductCategory, ProductCreate, ProductDetail, ProductImage, ProductResponse, ProductSummary,
    ProductUpdate, ReviewResponse, ReviewWithUser, SustainabilityInfo, UserProfile,
};
use crate::db::repository::{
    ProductFilter, ProductRepository, ReviewRepository, UserRepository, make_thing,
};
use crate::services::media::{self, MAX_IMAGES_PER_REQUEST, UploadFile};
use crate::utils::validation::{
    MAX_LABEL_LEN, MAX_NAME_LEN, MAX_TEXT_LEN, validate_optional_text, validate_required_text,
};
use shared::{ApiResponse, AppError, AppResult, response};

const PRODUCT_TABLE: &str = "product";
const USER_TABLE: &str = "user";

/// Default page size of the product list
const DEFAULT_PAGE_SIZE: u32 = 12;

/// Query parameters of GET /api/products
///
/// `page`/`limit` arrive as raw strings: non-numeric input silently falls
/// back to the defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ProductListQuery {
    fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.parse().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }

    fn limit(&self) -> u32 {
        self.limit
            .as_deref()
            .and_then(|l| l.parse().ok())
            .filter(|l| *l >= 1)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

/// Text fields of the product multipart form (create and update)
#[derive(Debug, Default)]
struct ProductFields {
    name: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    category: Option<ProductCategory>,
    materials_used: Option<Vec<String>>,
    colors: Option<Vec<String>>,
    waste_diverted: Option<String>,
    co2_reduction: Option<String>,
    stock: Option<i64>,
}

/// Pull text fields and image files out of the multipart form
async fn parse_product_form(
    mut multipart: Multipart,
) -> AppResult<(ProductFields, Vec<UploadFile>)> {
    let mut fields = ProductFields::default();
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {e}")))?
    {
        let Some(name) = field.name().map(|s| s.to_string()) else {
            continue;
        };

        if name == "images" {
            let filename = field
                .file_name()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "upload".to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?;
            files.push(UploadFile {
                filename,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?;

        match name.as_str() {
            "name" => fields.name = Some(value),
            "description" => fields.description = Some(value),
            "price" => {
                fields.price = Some(
                    value
                        .parse()
                        .map_err(|_| AppError::validation("price must be a number"))?,
                )
            }
            "category" => {
                fields.category = Some(ProductCategory::parse(&value).ok_or_else(|| {
                    AppError::validation(format!("Unknown category '{value}'"))
                })?)
            }
            "materialsUsed" => fields.materials_used.get_or_insert_with(Vec::new).push(value),
            "colors" => fields.colors.get_or_insert_with(Vec::new).push(value),
            "wasteDiverted" => fields.waste_diverted = Some(value),
            "co2Reduction" => fields.co2_reduction = Some(value),
            "stock" => {
                fields.stock = Some(
                    value
                        .parse()
                        .map_err(|_| AppError::validation("stock must be an integer"))?,
                )
            }
            // unknown form fields are ignored
            _ => {}
        }
    }

    Ok((fields, files))
}

/// Field checks shared by create and update (update only sees Some fields)
fn validate_fields(fields: &ProductFields) -> AppResult<()> {
    if let Some(ref name) = fields.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(ref description) = fields.description {
        validate_required_text(description, "description", MAX_TEXT_LEN)?;
    }
    if let Some(price) = fields.price
        && price < 0.0
    {
        return Err(AppError::validation("price must not be negative"));
    }
    if let Some(stock) = fields.stock
        && stock < 0
    {
        return Err(AppError::validation("stock must not be negative"));
    }
    if let Some(ref materials) = fields.materials_used {
        for material in materials {
            validate_required_text(material, "materialsUsed", MAX_LABEL_LEN)?;
        }
    }
    validate_optional_text(&fields.waste_diverted, "wasteDiverted", MAX_TEXT_LEN)?;
    validate_optional_text(&fields.co2_reduction, "co2Reduction", MAX_TEXT_LEN)?;
    Ok(())
}

/// Upload every file to the media collaborator, all at once.
///
/// All-or-nothing: a single rejection fails the request. Files the
/// collaborator already accepted are not rolled back.
async fn upload_images(state: &ServerState, files: &[UploadFile]) -> AppResult<Vec<ProductImage>> {
    if files.len() > MAX_IMAGES_PER_REQUEST {
        return Err(AppError::validation(format!(
            "At most {MAX_IMAGES_PER_REQUEST} images per request"
        )));
    }
    for file in files {
        media::validate_image(file)?;
    }

    let folder = state.config.media_folder.clone();
    let uploads = files.iter().map(|file| state.media.upload(file, &folder));
    try_join_all(uploads).await
}

// =============================================================================
// Product Handlers
// =============================================================================

/// GET /api/products - 商品列表 (过滤/排序/分页)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProductListQuery>,
) -> AppResult<Json<ApiResponse<Vec<ProductSummary>>>> {
    let page = query.page();
    let limit = query.limit();

    let product_repo = ProductRepository::new(state.db.clone());
    let filter = ProductFilter {
        category: query.category.clone(),
        search: query.search.clone(),
        sort: query.sort.clone(),
    };
    let (products, total) = product_repo.find_page(&filter, page, limit).await?;

    // Populate sellers and reviews for the page in two round-trips
    let user_repo = UserRepository::new(state.db.clone());
    let review_repo = ReviewRepository::new(state.db.clone());

    let seller_ids: Vec<Thing> = products.iter().map(|p| p.seller.clone()).collect();
    let sellers = user_repo.find_briefs(&seller_ids).await?;

    let product_ids: Vec<Thing> = products.iter().filter_map(|p| p.id.clone()).collect();
    let mut reviews_by_product: HashMap<String, Vec<ReviewResponse>> = HashMap::new();
    for review in review_repo.find_by_products(&product_ids).await? {
        reviews_by_product
            .entry(review.product.to_string())
            .or_default()
            .push(review.into());
    }

    let mut summaries = Vec::with_capacity(products.len());
    for product in products {
        let seller = sellers.get(&product.seller.to_string()).cloned();
        let key = product.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
        let ratings = reviews_by_product.remove(&key).unwrap_or_default();
        summaries.push(ProductSummary::assemble(product, seller, ratings));
    }

    let pages = response::pages_for(total, limit);
    let count = summaries.len();
    Ok(Json(ApiResponse::paginated(summaries, count, page, pages)))
}

/// GET /api/products/:id - 单个商品 (含卖家资料和评论)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    let product_repo = ProductRepository::new(state.db.clone());
    let product = product_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Product"))?;

    let user_repo = UserRepository::new(state.db.clone());
    let seller = user_repo
        .find_by_id(&product.seller)
        .await?
        .map(UserProfile::from);

    let review_repo = ReviewRepository::new(state.db.clone());
    let product_thing = make_thing(PRODUCT_TABLE, &id);
    let reviews = review_repo.find_by_product(&product_thing).await?;

    let reviewer_ids: Vec<Thing> = reviews.iter().map(|r| r.user.clone()).collect();
    let reviewers = user_repo.find_briefs(&reviewer_ids).await?;

    let ratings = reviews
        .into_iter()
        .map(|review| {
            let user = reviewers.get(&review.user.to_string()).cloned();
            ReviewWithUser::assemble(review, user)
        })
        .collect();

    Ok(Json(ApiResponse::ok(ProductDetail::assemble(
        product, seller, ratings,
    ))))
}

/// POST /api/products - 创建商品 (seller|admin)
///
/// 卖家字段强制为当前调用者，忽略表单中的任何 seller 输入。
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<ProductResponse>>)> {
    require_seller(&user)?;

    let (fields, files) = parse_product_form(multipart).await?;
    validate_fields(&fields)?;

    let name = fields
        .name
        .clone()
        .ok_or_else(|| AppError::validation("name is required"))?;
    let description = fields
        .description
        .clone()
        .ok_or_else(|| AppError::validation("description is required"))?;
    let price = fields
        .price
        .ok_or_else(|| AppError::validation("price is required"))?;
    let category = fields
        .category
        .ok_or_else(|| AppError::validation("category is required"))?;

    let images = upload_images(&state, &files).await?;

    let data = ProductCreate {
        name,
        description,
        price,
        category,
        materials_used: fields.materials_used.unwrap_or_default(),
        colors: fields.colors.unwrap_or_default(),
        sustainability_info: SustainabilityInfo {
            waste_diverted: fields.waste_diverted,
            co2_reduction: fields.co2_reduction,
        },
        seller: make_thing(USER_TABLE, &user.id),
        stock: fields.stock,
        images,
    };

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(data).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(product.into())),
    ))
}

/// PUT /api/products/:id - 更新商品 (仅所有者或管理员)
///
/// 新上传的图片追加到现有图片列表之后，不替换。
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<ProductResponse>>> {
    require_seller(&user)?;

    let repo = ProductRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Product"))?;
    ensure_owner_or_admin(&user, &existing.seller.to_string())?;

    let (fields, files) = parse_product_form(multipart).await?;
    validate_fields(&fields)?;

    let images = if files.is_empty() {
        None
    } else {
        let mut all = existing.images.clone();
        all.extend(upload_images(&state, &files).await?);
        Some(all)
    };

    let sustainability_info =
        if fields.waste_diverted.is_some() || fields.co2_reduction.is_some() {
            Some(SustainabilityInfo {
                waste_diverted: fields.waste_diverted,
                co2_reduction: fields.co2_reduction,
            })
        } else {
            None
        };

    let data = ProductUpdate {
        name: fields.name,
        description: fields.description,
        price: fields.price,
        category: fields.category,
        materials_used: fields.materials_used,
        colors: fields.colors,
        sustainability_info,
        stock: fields.stock,
        images,
    };

    let product = repo.update(&id, data).await?;

    Ok(Json(ApiResponse::ok(product.into())))
}

/// DELETE /api/products/:id - 删除商品 (仅所有者或管理员)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    require_seller(&user)?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Product"))?;
    ensure_owner_or_admin(&user, &product.seller.to_string())?;

    // TODO: delete product.images via MediaStorage::delete once the
    // collaborator exposes a bulk delete; until then remote objects leak.
    repo.delete(&id).await?;

    Ok(Json(ApiResponse::ok(response::empty())))
}
