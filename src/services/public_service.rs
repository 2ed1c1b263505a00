// src/services/public_service.rs
// DOCUMENTATION: Assembles the public-site hotel aggregate
// PURPOSE: One payload the browsing site renders from, built at two depths
// and cached as serialized JSON

use crate::db::{
    CatalogRepository, ContentRepository, HotelRepository, RoomMediaRepository,
};
use crate::errors::ApiError;
use crate::models::{PublicHotelResponse, PublicInclude};
use crate::services::ResponseCache;
use sqlx::PgPool;
use uuid::Uuid;

/// PublicService: read-side aggregation for the public endpoint
pub struct PublicService;

impl PublicService {
    /// Build the aggregate at the requested depth and serialize it
    /// Basic depth: card, details, address, primary image. All depth adds
    /// the full gallery, rooms, amenities, labels, highlights, FAQs, policy
    pub async fn build_hotel_payload(
        pool: &PgPool,
        hotel_id: Uuid,
        include: PublicInclude,
    ) -> Result<String, ApiError> {
        let card = HotelRepository::get_hotel_card(pool, hotel_id).await?;

        let details = HotelRepository::details_by_card(pool, hotel_id).await?;
        let address = match &details {
            Some(details) => Some(HotelRepository::get_address(pool, details.address_id).await?),
            None => None,
        };
        let primary_image = RoomMediaRepository::primary_image(pool, hotel_id).await?;

        let mut response = PublicHotelResponse {
            card,
            details,
            address,
            primary_image,
            images: None,
            rooms: None,
            amenities: None,
            labels: None,
            highlights: None,
            faqs: None,
            policy: None,
        };

        if include == PublicInclude::All {
            response.images = Some(RoomMediaRepository::images_by_card(pool, hotel_id).await?);
            response.rooms = Some(RoomMediaRepository::rooms_by_card(pool, hotel_id).await?);
            response.amenities =
                Some(CatalogRepository::amenities_by_card(pool, hotel_id).await?);
            response.labels = Some(CatalogRepository::labels_by_card(pool, hotel_id).await?);
            response.highlights =
                Some(CatalogRepository::highlights_by_card(pool, hotel_id).await?);
            response.faqs = Some(ContentRepository::faqs_by_card(pool, hotel_id).await?);
            response.policy = ContentRepository::policy_by_card(pool, hotel_id).await?;
        }

        serde_json::to_string(&response)
            .map_err(|e| ApiError::Database(format!("Failed to serialize hotel payload: {}", e)))
    }

    /// Drop every cached depth for a hotel after a write touches it
    pub async fn invalidate_hotel(cache: &ResponseCache, hotel_id: Uuid) {
        cache
            .invalidate_prefix(&format!("public:hotel:{}:", hotel_id))
            .await;
    }
}
