mod common;

use common::*;
use educademy_lib::application::ports::AnswerPatch;
use educademy_lib::domain::aggregates::{Aggregate, QuestionStats, ReviewStats};
use educademy_lib::domain::entities::{ListPage, ListQuery, Question, Review};
use educademy_lib::domain::value_objects::RecordId;
use educademy_lib::{QuestionStore, ReviewStore};
use std::sync::Arc;

async fn questions(records: Vec<Question>) -> (Arc<FakeQuestionGateway>, Arc<QuestionStore>) {
    let gateway = Arc::new(FakeQuestionGateway::default());
    gateway.listing.respond(Ok(ListPage::single(records))).await;
    let store = Arc::new(QuestionStore::new(gateway.clone()));
    store.load(ListQuery::default()).await.unwrap();
    (gateway, store)
}

async fn reviews(records: Vec<Review>) -> (Arc<FakeReviewGateway>, Arc<ReviewStore>) {
    let gateway = Arc::new(FakeReviewGateway::default());
    gateway.listing.respond(Ok(ListPage::single(records))).await;
    let store = Arc::new(ReviewStore::new(gateway.clone()));
    store.load(ListQuery::default()).await.unwrap();
    (gateway, store)
}

#[tokio::test]
async fn test_answer_then_delete() {
    let (gateway, store) = questions(vec![question("q1", false, 0)]).await;
    let q1 = RecordId::from("q1");
    let content = "Borrow it mutably once.";

    let reply = gateway.answers.hold().await;
    let task = tokio::spawn({
        let store = Arc::clone(&store);
        let q1 = q1.clone();
        async move { store.answer(&q1, content, false).await }
    });
    settle_until(|| store.is_pending(&q1)).await;

    let optimistic = store.find(&q1).unwrap();
    assert!(optimistic.has_my_answer);
    assert_eq!(optimistic.total_answers, 1);
    let pending_answer = optimistic.my_answer.clone().unwrap();
    assert!(pending_answer.id.is_pending());
    assert!(pending_answer.id.to_string().starts_with("temp_"));
    assert_eq!(pending_answer.content, content);

    reply.send(Ok(answer("a1", content))).unwrap();
    let reconciled = task.await.unwrap().unwrap().unwrap();
    assert_eq!(reconciled.my_answer, Some(answer("a1", content)));
    assert!(reconciled.has_my_answer);
    assert_eq!(reconciled.total_answers, 1);
    assert_eq!(reconciled.updated_at, at(2));
    assert_eq!(
        gateway.drafts.lock().await[0].0,
        "q1".to_string(),
        "answer is posted against the question"
    );

    let reply = gateway.answer_deletes.hold().await;
    let task = tokio::spawn({
        let store = Arc::clone(&store);
        let q1 = q1.clone();
        async move { store.delete_answer(&q1, &"a1".into()).await }
    });
    settle_until(|| store.is_pending(&q1)).await;

    let optimistic = store.find(&q1).unwrap();
    assert!(!optimistic.has_my_answer);
    assert_eq!(optimistic.total_answers, 0);
    assert_eq!(optimistic.my_answer, None);

    reply.send(Ok(())).unwrap();
    task.await.unwrap().unwrap();
    assert_eq!(store.find(&q1), Some(optimistic));
    assert!(!store.is_pending(&q1));
    assert_eq!(store.collection().pending_count(), 0);
}

#[tokio::test]
async fn test_answer_updates_aggregate_like_recompute() {
    let mut records: Vec<Question> = (1..=5)
        .map(|n| question(&format!("q{n}"), true, 1))
        .collect();
    records.extend((6..=8).map(|n| question(&format!("q{n}"), false, 0)));
    let (gateway, store) = questions(records).await;

    let stats = store.summary();
    assert_eq!(stats.answered_questions, 5);
    assert_eq!(stats.unanswered_questions, 3);
    assert_eq!(stats.response_rate, 63);

    let q6 = RecordId::from("q6");
    let reply = gateway.answers.hold().await;
    let task = tokio::spawn({
        let store = Arc::clone(&store);
        let q6 = q6.clone();
        async move { store.answer(&q6, "Here is how.", false).await }
    });
    settle_until(|| store.is_pending(&q6)).await;

    let stats = store.summary();
    assert_eq!(stats.answered_questions, 6);
    assert_eq!(stats.unanswered_questions, 2);
    assert_eq!(stats.response_rate, 75);
    assert_eq!(stats, QuestionStats::recompute(&store.records()));

    reply.send(Ok(answer("a6", "Here is how."))).unwrap();
    task.await.unwrap().unwrap();
    assert_eq!(store.summary(), stats);
}

#[tokio::test]
async fn test_failed_answer_restores_question_and_stats() {
    let original = question("q1", false, 2);
    let (gateway, store) = questions(vec![original.clone(), question("q2", true, 1)]).await;
    let before = store.summary();

    gateway
        .answers
        .respond(Err(remote_failure("Question is locked")))
        .await;
    let failure = store.answer(&"q1".into(), "Try again", true).await.unwrap_err();

    assert_eq!(failure.snapshot, Some(original.clone()));
    assert_eq!(store.find(&"q1".into()), Some(original));
    assert_eq!(store.summary(), before);
}

#[tokio::test]
async fn test_update_answer_and_mark_resolved() {
    let (gateway, store) = questions(vec![question("q1", true, 3)]).await;
    let q1 = RecordId::from("q1");

    let edited = answer("q1-answer", "Edited answer");
    gateway.answer_updates.respond(Ok(edited.clone())).await;
    let updated = store
        .update_answer(&q1, &"q1-answer".into(), AnswerPatch::content("Edited answer"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.my_answer, Some(edited));
    assert_eq!(store.summary().total_answers, 3);

    let mut server = question("q1", false, 0);
    server.is_resolved = true;
    server.my_answer = None;
    server.updated_at = at(9);
    gateway.resolutions.respond(Ok(server)).await;
    let resolved = store.mark_resolved(&q1, true).await.unwrap().unwrap();
    assert!(resolved.is_resolved);
    assert_eq!(resolved.updated_at, at(9));
    assert_eq!(resolved.total_answers, 3);
    assert!(resolved.my_answer.is_some());
}

#[tokio::test]
async fn test_review_reply_flow() {
    let (gateway, store) = reviews(vec![review("r1", 5, None), review("r2", 3, Some("rp2"))]).await;
    let r1 = RecordId::from("r1");
    assert_eq!(store.summary().response_rate, 50);

    let reply = gateway.replies.hold().await;
    let task = tokio::spawn({
        let store = Arc::clone(&store);
        let r1 = r1.clone();
        async move { store.reply(&r1, "Glad it helped!").await }
    });
    settle_until(|| store.is_pending(&r1)).await;
    assert_eq!(store.summary().replied_reviews, 2);
    assert_eq!(store.summary().pending_replies, 0);

    reply
        .send(Ok(review_reply("rp1", "Glad it helped!")))
        .unwrap();
    let reconciled = task.await.unwrap().unwrap().unwrap();
    assert_eq!(reconciled.reply.unwrap().id, RecordId::from("rp1"));

    gateway
        .reply_deletes
        .respond(Err(remote_failure("Forbidden")))
        .await;
    let before = store.find(&r1);
    let failure = store.delete_reply(&r1, &"rp1".into()).await.unwrap_err();
    assert_eq!(failure.user_message(), "Forbidden");
    assert_eq!(store.find(&r1), before);
    assert_eq!(store.summary(), ReviewStats::recompute(&store.records()));
}

#[tokio::test]
async fn test_pending_answer_cannot_be_edited() {
    let (_gateway, store) = questions(vec![question("q1", false, 0)]).await;
    let (pending, _) = RecordId::pending();

    let failure = store
        .update_answer(&"q1".into(), &pending, AnswerPatch::content("x"))
        .await
        .unwrap_err();
    assert!(failure.is_rejected_before_dispatch());
}
