use serde_json::Value;

use crate::api::{ApiError, ApiResponse, Gateway, RequestContext};
use crate::models::{HolyItem, HolyItemOrder, NewHolyItem, OrderRequest};

pub struct HolyItemService<'a> {
    gateway: &'a Gateway,
}

impl<'a> HolyItemService<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Items currently listed in the inventory
    pub async fn available(&self) -> Result<ApiResponse<Vec<HolyItem>>, ApiError> {
        self.gateway.send(RequestContext::get("/api/holy-items")).await
    }

    pub async fn add(&self, item: &NewHolyItem) -> Result<ApiResponse<HolyItem>, ApiError> {
        if item.item_name.trim().is_empty() {
            return Err(ApiError::InvalidRequest("Please fill item name and stock quantity".to_string()));
        }
        if item.stock < 0 {
            return Err(ApiError::InvalidRequest("Please enter a valid stock quantity".to_string()));
        }
        let ctx = RequestContext::post("/api/holy-items").json(item)?;
        self.gateway.send(ctx).await
    }

    pub async fn update_stock(&self, id: i64, stock: i64) -> Result<ApiResponse<HolyItem>, ApiError> {
        let ctx = RequestContext::put(format!("/api/holy-items/{}/stock/{}", id, stock));
        self.gateway.send(ctx).await
    }

    pub async fn place_order(&self, holy_item_id: i64, quantity: i64) -> Result<ApiResponse<Value>, ApiError> {
        let ctx = RequestContext::post("/api/holy-items/order").json(&OrderRequest {
            holy_item_id,
            quantity,
        })?;
        self.gateway.send(ctx).await
    }

    pub async fn all_orders(&self) -> Result<ApiResponse<Vec<HolyItemOrder>>, ApiError> {
        self.gateway.send(RequestContext::get("/api/holy-items/orders")).await
    }

    pub async fn my_orders(&self) -> Result<ApiResponse<Vec<HolyItemOrder>>, ApiError> {
        self.gateway.send(RequestContext::get("/api/holy-items/orders/me")).await
    }
}
