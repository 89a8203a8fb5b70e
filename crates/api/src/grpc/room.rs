use std::sync::Arc;

use roomdesk_core::roles::{READ_ROLES, WRITE_ROLES};
use roomdesk_db::models::room::{CreateRoom, Room, UpdateRoom};
use roomdesk_proto::v1 as pb;
use roomdesk_proto::v1::room_service_server::RoomService;
use tonic::{Request, Response, Status};

use super::auth::authorize;
use super::list_request;
use crate::middleware::rbac::{ADMIN_REQUIRED, CLIENT_REQUIRED};
use crate::services;
use crate::state::AppState;

/// `roomdesk.v1.RoomService` over the shared room service.
pub struct RoomGrpc {
    rooms: Arc<services::RoomService>,
}

impl RoomGrpc {
    pub fn new(state: &AppState) -> Self {
        Self {
            rooms: state.rooms.clone(),
        }
    }
}

fn to_proto(room: &Room) -> pb::Room {
    pb::Room {
        id: room.id,
        name: room.name.clone(),
        description: room.description.clone(),
        available: room.available,
    }
}

#[tonic::async_trait]
impl RoomService for RoomGrpc {
    async fn create_room(
        &self,
        request: Request<pb::CreateRoomRequest>,
    ) -> Result<Response<pb::Room>, Status> {
        authorize(&request, WRITE_ROLES, ADMIN_REQUIRED)?;
        let req = request.into_inner();
        let input = CreateRoom {
            name: req.name,
            description: req.description,
            available: req.available.unwrap_or(true),
        };

        let room = self.rooms.create(&input).await?;
        Ok(Response::new(to_proto(&room)))
    }

    async fn get_room(
        &self,
        request: Request<pb::GetRoomRequest>,
    ) -> Result<Response<pb::Room>, Status> {
        authorize(&request, READ_ROLES, CLIENT_REQUIRED)?;
        let room = self.rooms.get(request.into_inner().id).await?;
        Ok(Response::new(to_proto(&room)))
    }

    async fn update_room(
        &self,
        request: Request<pb::UpdateRoomRequest>,
    ) -> Result<Response<pb::Room>, Status> {
        authorize(&request, WRITE_ROLES, ADMIN_REQUIRED)?;
        let req = request.into_inner();
        let input = UpdateRoom {
            name: req.name,
            description: req.description,
            available: req.available,
        };

        let room = self.rooms.update(req.id, &input).await?;
        Ok(Response::new(to_proto(&room)))
    }

    async fn delete_room(
        &self,
        request: Request<pb::DeleteRoomRequest>,
    ) -> Result<Response<pb::DeleteRoomResponse>, Status> {
        authorize(&request, WRITE_ROLES, ADMIN_REQUIRED)?;
        self.rooms.delete(request.into_inner().id).await?;
        Ok(Response::new(pb::DeleteRoomResponse {}))
    }

    async fn list_rooms(
        &self,
        request: Request<pb::ListRoomsRequest>,
    ) -> Result<Response<pb::ListRoomsResponse>, Status> {
        authorize(&request, READ_ROLES, CLIENT_REQUIRED)?;
        let rooms = self
            .rooms
            .list(&list_request(request.into_inner().options))
            .await?;

        Ok(Response::new(pb::ListRoomsResponse {
            rooms: rooms.iter().map(to_proto).collect(),
        }))
    }
}
