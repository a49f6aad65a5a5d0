use std::sync::Arc;

use opsdesk_core::{AppError, RecordId};
use opsdesk_domain::{
    Assignee, FormContext, MessageKind, RecordForm, Ticket, TicketForm, TicketPriority,
    TicketStatus, TicketUpdate,
};

use super::TicketService;
use crate::test_support::{FakeMessageRepository, FakeRecordRepository};

fn id(value: &str) -> RecordId {
    RecordId::parse(value).unwrap_or_else(|_| unreachable!())
}

fn ticket(ticket_id: &str, title: &str) -> Ticket {
    TicketForm {
        title: title.to_owned(),
        description: "Customer reported a problem".to_owned(),
        customer_name: "Omar Haddad".to_owned(),
        customer_email: "omar@mail.example".to_owned(),
        customer_account_id: "MT5-204431".to_owned(),
        customer_country: "Jordan".to_owned(),
        ..TicketForm::blank()
    }
    .into_record(id(ticket_id), &FormContext::now("Seeder"))
    .unwrap_or_else(|_| unreachable!())
}

struct Fixture {
    service: TicketService,
    tickets: Arc<FakeRecordRepository<Ticket>>,
    messages: Arc<FakeMessageRepository>,
}

fn fixture() -> Fixture {
    let tickets = Arc::new(FakeRecordRepository::with(vec![
        ticket("tk-1001", "Cannot log in"),
        ticket("tk-1002", "Withdrawal pending"),
        ticket("tk-1003", "Bonus not credited"),
    ]));
    let messages = Arc::new(FakeMessageRepository::default());
    Fixture {
        service: TicketService::new(tickets.clone(), messages.clone()),
        tickets,
        messages,
    }
}

#[tokio::test]
async fn status_update_changes_only_target_ticket() {
    let fixture = fixture();
    let before = fixture.tickets.records.lock().await.clone();

    let outcome = fixture
        .service
        .update_ticket(
            &id("tk-1002"),
            TicketUpdate {
                status: Some(TicketStatus::InProgress),
                ..TicketUpdate::default()
            },
            "Admin",
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(outcome.ticket.status, TicketStatus::InProgress);
    assert_eq!(outcome.messages.len(), 1);
    assert_eq!(
        outcome.messages[0].body,
        "Status changed from Open to In Progress"
    );
    assert_eq!(outcome.messages[0].kind, MessageKind::System);

    let after = fixture.tickets.records.lock().await.clone();
    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[2]);
    assert_eq!(after[1], outcome.ticket);
}

#[tokio::test]
async fn noop_update_appends_nothing() {
    let fixture = fixture();

    let outcome = fixture
        .service
        .update_ticket(
            &id("tk-1001"),
            TicketUpdate {
                priority: Some(TicketPriority::Medium),
                ..TicketUpdate::default()
            },
            "Admin",
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(outcome.messages.is_empty());
    assert_eq!(fixture.tickets.write_count().await, 0);
    assert!(fixture.messages.messages.lock().await.is_empty());
}

#[tokio::test]
async fn update_without_fields_is_rejected() {
    let fixture = fixture();

    let result = fixture
        .service
        .update_ticket(&id("tk-1001"), TicketUpdate::default(), "Admin")
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(fixture.tickets.write_count().await, 0);
    assert!(fixture.messages.messages.lock().await.is_empty());
}

#[tokio::test]
async fn assignment_is_announced_in_thread() {
    let fixture = fixture();
    let ticket_id = id("tk-1003");

    fixture
        .service
        .update_ticket(
            &ticket_id,
            TicketUpdate {
                status: Some(TicketStatus::Escalated),
                assignee: Some(Some(Assignee {
                    id: "mgr-2".to_owned(),
                    name: "Nadia Petrova".to_owned(),
                })),
                ..TicketUpdate::default()
            },
            "Admin",
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    let thread = fixture
        .service
        .list_messages(&ticket_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    let bodies: Vec<&str> = thread.iter().map(|message| message.body.as_str()).collect();
    assert_eq!(
        bodies,
        vec![
            "Status changed from Open to Escalated",
            "Ticket assigned to Nadia Petrova",
        ]
    );
}

#[tokio::test]
async fn update_of_unknown_ticket_is_not_found() {
    let fixture = fixture();

    let result = fixture
        .service
        .update_ticket(
            &id("tk-9999"),
            TicketUpdate {
                status: Some(TicketStatus::Closed),
                ..TicketUpdate::default()
            },
            "Admin",
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn reply_is_stored_and_counted() {
    let fixture = fixture();
    let ticket_id = id("tk-1001");

    let message = fixture
        .service
        .post_message(&ticket_id, "Lena Ortiz", "  We reset your password.  ")
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(message.body, "We reset your password.");
    assert_eq!(message.kind, MessageKind::Agent);
    let ticket = fixture
        .tickets
        .records
        .lock()
        .await
        .first()
        .cloned()
        .unwrap_or_else(|| unreachable!());
    assert_eq!(ticket.message_count, 1);
}

#[tokio::test]
async fn empty_reply_is_rejected() {
    let fixture = fixture();

    let result = fixture
        .service
        .post_message(&id("tk-1001"), "Lena Ortiz", "   ")
        .await;

    let Err(AppError::InvalidForm(errors)) = result else {
        unreachable!()
    };
    assert_eq!(errors.get("body"), Some("Message cannot be empty"));
    assert_eq!(fixture.tickets.write_count().await, 0);
}

#[tokio::test]
async fn mark_read_zeroes_unread_counter() {
    let fixture = fixture();
    {
        let mut tickets = fixture.tickets.records.lock().await;
        tickets[0].unread_count = 3;
    }

    let ticket = fixture
        .service
        .mark_read(&id("tk-1001"))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(ticket.unread_count, 0);
    assert_eq!(fixture.tickets.records.lock().await[0].unread_count, 0);
}

#[tokio::test]
async fn tags_are_replaced_and_blank_tags_rejected() {
    let fixture = fixture();
    let ticket_id = id("tk-1002");

    let ticket = fixture
        .service
        .assign_tags(
            &ticket_id,
            &["withdrawal".to_owned(), "vip".to_owned()],
            "Admin",
        )
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(ticket.tag_list(), "vip, withdrawal");

    let result = fixture
        .service
        .assign_tags(&ticket_id, &["ok".to_owned(), " ".to_owned()], "Admin")
        .await;
    assert!(matches!(result, Err(AppError::InvalidForm(_))));
}

#[tokio::test]
async fn summary_counts_every_status() {
    let fixture = fixture();
    {
        let mut tickets = fixture.tickets.records.lock().await;
        tickets[0].status = TicketStatus::Closed;
        tickets[1].priority = TicketPriority::Critical;
        tickets[2].unread_count = 2;
    }

    let summary = fixture
        .service
        .summary()
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(summary.total, 3);
    assert_eq!(summary.by_status.len(), TicketStatus::ALL.len());
    assert_eq!(summary.by_status[0], (TicketStatus::Open, 2));
    assert_eq!(summary.by_status[5], (TicketStatus::Closed, 1));
    assert_eq!(summary.by_priority[4], (TicketPriority::Critical, 1));
    assert_eq!(summary.unassigned_open, 2);
    assert_eq!(summary.unread_messages, 2);
}

#[tokio::test]
async fn delete_drops_ticket_and_thread() {
    let fixture = fixture();
    let ticket_id = id("tk-1001");
    fixture
        .service
        .post_message(&ticket_id, "Lena Ortiz", "Looking into it")
        .await
        .unwrap_or_else(|_| unreachable!());

    fixture
        .service
        .delete_ticket(&ticket_id, "Admin")
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(fixture.tickets.records.lock().await.len(), 2);
    assert!(fixture.messages.messages.lock().await.is_empty());
    assert!(matches!(
        fixture.service.list_messages(&ticket_id).await,
        Err(AppError::NotFound(_))
    ));
}
