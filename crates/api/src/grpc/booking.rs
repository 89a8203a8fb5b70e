use std::sync::Arc;

use roomdesk_core::roles::{READ_ROLES, WRITE_ROLES};
use roomdesk_db::models::booking::{Booking, CreateBooking, UpdateBooking};
use roomdesk_proto::v1 as pb;
use roomdesk_proto::v1::booking_service_server::BookingService;
use tonic::{Request, Response, Status};

use super::auth::authorize;
use super::{from_proto_timestamp, list_request, to_proto_timestamp};
use crate::middleware::rbac::{ADMIN_REQUIRED, CLIENT_REQUIRED};
use crate::services;
use crate::state::AppState;

/// `roomdesk.v1.BookingService` over the shared booking service.
pub struct BookingGrpc {
    bookings: Arc<services::BookingService>,
}

impl BookingGrpc {
    pub fn new(state: &AppState) -> Self {
        Self {
            bookings: state.bookings.clone(),
        }
    }
}

fn to_proto(booking: &Booking) -> pb::Booking {
    pb::Booking {
        id: booking.id,
        client_id: booking.client_id,
        room_id: booking.room_id,
        start_date: Some(to_proto_timestamp(&booking.start_date)),
        end_date: Some(to_proto_timestamp(&booking.end_date)),
        status: booking.status.clone(),
    }
}

#[tonic::async_trait]
impl BookingService for BookingGrpc {
    async fn create_booking(
        &self,
        request: Request<pb::CreateBookingRequest>,
    ) -> Result<Response<pb::Booking>, Status> {
        authorize(&request, READ_ROLES, CLIENT_REQUIRED)?;
        let req = request.into_inner();
        let input = CreateBooking {
            client_id: req.client_id,
            room_id: req.room_id,
            start_date: from_proto_timestamp("start_date", req.start_date)?,
            end_date: from_proto_timestamp("end_date", req.end_date)?,
            status: req.status,
        };

        let booking = self.bookings.create(&input).await?;
        Ok(Response::new(to_proto(&booking)))
    }

    async fn get_booking(
        &self,
        request: Request<pb::GetBookingRequest>,
    ) -> Result<Response<pb::Booking>, Status> {
        authorize(&request, READ_ROLES, CLIENT_REQUIRED)?;
        let booking = self.bookings.get(request.into_inner().id).await?;
        Ok(Response::new(to_proto(&booking)))
    }

    async fn update_booking(
        &self,
        request: Request<pb::UpdateBookingRequest>,
    ) -> Result<Response<pb::Booking>, Status> {
        authorize(&request, WRITE_ROLES, ADMIN_REQUIRED)?;
        let req = request.into_inner();
        let input = UpdateBooking {
            client_id: req.client_id,
            room_id: req.room_id,
            start_date: from_proto_timestamp("start_date", req.start_date)?,
            end_date: from_proto_timestamp("end_date", req.end_date)?,
            status: req.status,
        };

        let booking = self.bookings.update(req.id, &input).await?;
        Ok(Response::new(to_proto(&booking)))
    }

    async fn delete_booking(
        &self,
        request: Request<pb::DeleteBookingRequest>,
    ) -> Result<Response<pb::DeleteBookingResponse>, Status> {
        authorize(&request, WRITE_ROLES, ADMIN_REQUIRED)?;
        self.bookings.delete(request.into_inner().id).await?;
        Ok(Response::new(pb::DeleteBookingResponse {}))
    }

    async fn list_bookings(
        &self,
        request: Request<pb::ListBookingsRequest>,
    ) -> Result<Response<pb::ListBookingsResponse>, Status> {
        authorize(&request, READ_ROLES, CLIENT_REQUIRED)?;
        let list = list_request(request.into_inner().options);
        let bookings = self.bookings.list(&list).await?;

        Ok(Response::new(pb::ListBookingsResponse {
            bookings: bookings.iter().map(to_proto).collect(),
        }))
    }
}
