use axum::{
    extract::{Query, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    domain::video::dto::{
        GenerateVideoRequest, GenerateVideoResponse, ListVideosQuery, ListVideosResponse,
    },
    domain::video::VideoService,
    error::{AppError, AppResult},
    infrastructure::auth::AuthUser,
};

pub struct VideoController {
    video_service: Arc<VideoService>,
}

impl VideoController {
    pub fn new(video_service: Arc<VideoService>) -> Self {
        Self { video_service }
    }

    /// POST /api/generate - Submit a video generation job
    pub async fn generate(
        State(controller): State<Arc<VideoController>>,
        Extension(auth_user): Extension<AuthUser>,
        Json(request): Json<GenerateVideoRequest>,
    ) -> AppResult<Json<GenerateVideoResponse>> {
        let response = controller
            .video_service
            .generate(auth_user.user_id, request)
            .await
            .map_err(AppError::from)?;

        Ok(Json(response))
    }

    /// GET /api/generate - List the caller's videos, paginated
    pub async fn list(
        State(controller): State<Arc<VideoController>>,
        Extension(auth_user): Extension<AuthUser>,
        Query(query): Query<ListVideosQuery>,
    ) -> AppResult<Json<ListVideosResponse>> {
        let response = controller
            .video_service
            .list_videos(auth_user.user_id, query)
            .await
            .map_err(AppError::from)?;

        Ok(Json(response))
    }
}
