//! gRPC service tests.
//!
//! Requests are built by hand with a [`Principal`] in their extensions, the
//! way `AuthInterceptor` leaves them, and sent straight to the service
//! implementations.

mod common;

use common::{build_test_app, TestApp};
use roomdesk_api::grpc::{BookingGrpc, ClientGrpc, RoomGrpc};
use roomdesk_api::middleware::auth::Principal;
use roomdesk_core::entity::EntityKind;
use roomdesk_core::roles::Role;
use roomdesk_proto::v1 as pb;
use roomdesk_proto::v1::booking_service_server::BookingService;
use roomdesk_proto::v1::client_service_server::ClientService;
use roomdesk_proto::v1::room_service_server::RoomService;
use tonic::{Code, Request};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn as_role<T>(message: T, role: Role) -> Request<T> {
    let mut request = Request::new(message);
    request.extensions_mut().insert(Principal {
        client_id: 1,
        email: "caller@example.com".to_string(),
        role,
    });
    request
}

fn ts(seconds: i64) -> Option<prost_types::Timestamp> {
    Some(prost_types::Timestamp { seconds, nanos: 0 })
}

fn create_booking(room_id: i64) -> pb::CreateBookingRequest {
    pb::CreateBookingRequest {
        client_id: 2,
        room_id,
        start_date: ts(1_772_373_600),
        end_date: ts(1_772_539_200),
        status: "confirmed".to_string(),
    }
}

fn booking_grpc() -> (TestApp, BookingGrpc) {
    let t = build_test_app(EntityKind::Booking);
    let svc = BookingGrpc::new(&t.state);
    (t, svc)
}

// ---------------------------------------------------------------------------
// BookingService
// ---------------------------------------------------------------------------

#[tokio::test]
async fn booking_create_then_get() {
    let (t, svc) = booking_grpc();

    let created = svc
        .create_booking(as_role(create_booking(4), Role::Client))
        .await
        .unwrap()
        .into_inner();
    assert!(created.id > 0);
    assert_eq!(created.start_date, ts(1_772_373_600));

    let fetched = svc
        .get_booking(as_role(pb::GetBookingRequest { id: created.id }, Role::Client))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(fetched, created);
    assert_eq!(t.publisher.published().len(), 1);
}

#[tokio::test]
async fn booking_create_without_dates_is_invalid_argument() {
    let (t, svc) = booking_grpc();
    let mut request = create_booking(4);
    request.end_date = None;

    let status = svc
        .create_booking(as_role(request, Role::Admin))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
    assert!(t.publisher.published().is_empty());
}

#[tokio::test]
async fn booking_update_requires_admin() {
    let (_t, svc) = booking_grpc();
    let created = svc
        .create_booking(as_role(create_booking(4), Role::Client))
        .await
        .unwrap()
        .into_inner();

    let update = pb::UpdateBookingRequest {
        id: created.id,
        client_id: 2,
        room_id: 4,
        start_date: ts(1_772_373_600),
        end_date: ts(1_772_539_200),
        status: "cancelled".to_string(),
    };

    let status = svc
        .update_booking(as_role(update.clone(), Role::Client))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::PermissionDenied);

    let updated = svc
        .update_booking(as_role(update, Role::Admin))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(updated.status, "cancelled");
}

#[tokio::test]
async fn booking_get_absent_is_not_found() {
    let (_t, svc) = booking_grpc();

    let status = svc
        .get_booking(as_role(pb::GetBookingRequest { id: 404 }, Role::Admin))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn booking_list_uses_options() {
    let (_t, svc) = booking_grpc();
    for room in [8, 2, 5] {
        svc.create_booking(as_role(create_booking(room), Role::Client))
            .await
            .unwrap();
    }

    let options = pb::ListOptions {
        offset: 0,
        limit: 2,
        sort_by: "room_id".to_string(),
        sort_order: "asc".to_string(),
        filters: vec![],
    };
    let list = svc
        .list_bookings(as_role(
            pb::ListBookingsRequest {
                options: Some(options),
            },
            Role::Client,
        ))
        .await
        .unwrap()
        .into_inner();
    let rooms: Vec<i64> = list.bookings.iter().map(|b| b.room_id).collect();
    assert_eq!(rooms, vec![2, 5]);

    let bad = pb::ListOptions {
        sort_by: "nope".to_string(),
        ..Default::default()
    };
    let status = svc
        .list_bookings(as_role(
            pb::ListBookingsRequest { options: Some(bad) },
            Role::Client,
        ))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn request_without_principal_is_unauthenticated() {
    let (_t, svc) = booking_grpc();

    let status = svc
        .get_booking(Request::new(pb::GetBookingRequest { id: 1 }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::Unauthenticated);
}

// ---------------------------------------------------------------------------
// ClientService
// ---------------------------------------------------------------------------

fn create_client(email: &str) -> pb::CreateClientRequest {
    pb::CreateClientRequest {
        fname: "Ada".to_string(),
        sname: "Lovelace".to_string(),
        email: email.to_string(),
        password: "correct horse battery".to_string(),
        user_role: String::new(),
        activated: true,
    }
}

#[tokio::test]
async fn client_create_defaults_role_and_rejects_duplicates() {
    let t = build_test_app(EntityKind::Client);
    let svc = ClientGrpc::new(&t.state);

    let created = svc
        .create_client(as_role(create_client("ada@example.com"), Role::Admin))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(created.user_role, "client");
    assert!(created.activated);
    assert_eq!(created.version, 1);

    let status = svc
        .create_client(as_role(create_client("ada@example.com"), Role::Admin))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::AlreadyExists);
}

#[tokio::test]
async fn client_stale_update_is_aborted() {
    let t = build_test_app(EntityKind::Client);
    let svc = ClientGrpc::new(&t.state);
    let created = svc
        .create_client(as_role(create_client("ada@example.com"), Role::Admin))
        .await
        .unwrap()
        .into_inner();

    let update = pb::UpdateClientRequest {
        id: created.id,
        fname: "Ada".to_string(),
        sname: "King".to_string(),
        email: "ada@example.com".to_string(),
        user_role: "client".to_string(),
        activated: true,
        version: 1,
        password: None,
    };

    let updated = svc
        .update_client(as_role(update.clone(), Role::Admin))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(updated.version, 2);

    let status = svc
        .update_client(as_role(update, Role::Admin))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::Aborted);
}

#[tokio::test]
async fn client_by_email_requires_admin() {
    let t = build_test_app(EntityKind::Client);
    let svc = ClientGrpc::new(&t.state);
    svc.create_client(as_role(create_client("ada@example.com"), Role::Admin))
        .await
        .unwrap();

    let request = pb::GetClientByEmailRequest {
        email: "ada@example.com".to_string(),
    };
    let status = svc
        .get_client_by_email(as_role(request.clone(), Role::Client))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::PermissionDenied);

    let found = svc
        .get_client_by_email(as_role(request, Role::Admin))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(found.email, "ada@example.com");
}

#[tokio::test]
async fn client_delete_absent_is_not_found() {
    let t = build_test_app(EntityKind::Client);
    let svc = ClientGrpc::new(&t.state);

    let status = svc
        .delete_client(as_role(pb::DeleteClientRequest { id: 3 }, Role::Admin))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

// ---------------------------------------------------------------------------
// RoomService
// ---------------------------------------------------------------------------

#[tokio::test]
async fn room_crud_round() {
    let t = build_test_app(EntityKind::Room);
    let svc = RoomGrpc::new(&t.state);

    let created = svc
        .create_room(as_role(
            pb::CreateRoomRequest {
                name: "Loft".to_string(),
                description: String::new(),
                available: Some(true),
            },
            Role::Admin,
        ))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(t.publisher.published()[0].routing_key, "room.created");

    let listed = svc
        .list_rooms(as_role(pb::ListRoomsRequest { options: None }, Role::Client))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(listed.rooms, vec![created.clone()]);

    svc.delete_room(as_role(pb::DeleteRoomRequest { id: created.id }, Role::Admin))
        .await
        .unwrap();
    svc.delete_room(as_role(pb::DeleteRoomRequest { id: created.id }, Role::Admin))
        .await
        .unwrap();

    let status = svc
        .get_room(as_role(pb::GetRoomRequest { id: created.id }, Role::Client))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn room_create_defaults_to_available() {
    let t = build_test_app(EntityKind::Room);
    let svc = RoomGrpc::new(&t.state);

    let created = svc
        .create_room(as_role(
            pb::CreateRoomRequest {
                name: "Loft".to_string(),
                description: String::new(),
                available: None,
            },
            Role::Admin,
        ))
        .await
        .unwrap()
        .into_inner();
    assert!(created.available);

    let closed = svc
        .create_room(as_role(
            pb::CreateRoomRequest {
                name: "Cellar".to_string(),
                description: String::new(),
                available: Some(false),
            },
            Role::Admin,
        ))
        .await
        .unwrap()
        .into_inner();
    assert!(!closed.available);
}

#[tokio::test]
async fn room_create_requires_admin() {
    let t = build_test_app(EntityKind::Room);
    let svc = RoomGrpc::new(&t.state);

    let status = svc
        .create_room(as_role(
            pb::CreateRoomRequest {
                name: "Loft".to_string(),
                description: String::new(),
                available: Some(true),
            },
            Role::Client,
        ))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::PermissionDenied);
}
