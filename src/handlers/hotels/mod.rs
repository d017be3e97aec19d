// Hotel directory handlers. The directory itself is a collaborator of
// the security subsystem; these endpoints exist so the route policy has
// a real protected surface. Storage here is a simple shared list.

use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::app::AppState;

pub type HotelDirectory = Arc<RwLock<Vec<Hotel>>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub preferred: bool,
}

#[derive(Debug, Deserialize)]
pub struct NewHotel {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub preferred: bool,
}

/// GET /hotels/all - List the directory (any authenticated caller)
pub async fn all_get(State(state): State<AppState>) -> Json<Vec<Hotel>> {
    let hotels = state.hotels.read().await;
    Json(hotels.clone())
}

/// POST /hotels/add - Add a hotel (admin only, enforced by the guard)
pub async fn add_post(
    State(state): State<AppState>,
    Json(new): Json<NewHotel>,
) -> (StatusCode, Json<Hotel>) {
    let hotel = Hotel {
        id: Uuid::new_v4(),
        name: new.name,
        address: new.address,
        city: new.city,
        state: new.state,
        preferred: new.preferred,
    };
    state.hotels.write().await.push(hotel.clone());
    (StatusCode::CREATED, Json(hotel))
}
