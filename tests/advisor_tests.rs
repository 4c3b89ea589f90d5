//! Advice calls against a scripted provider.

mod common;

use common::{ScriptedClient, monstera};
use flora::{Advice, ERROR_REPLY, FailureKind, FloraError, PlantAdvisor, UNPROCESSABLE_REPLY};
use std::sync::Arc;

#[tokio::test]
async fn test_reply_text_is_returned_verbatim() {
    let advisor = PlantAdvisor::new(Arc::new(ScriptedClient::new().reply("T")));
    let reply = advisor.get_advice("How often should I water?", None).await;
    assert_eq!(reply, "T");
}

#[tokio::test]
async fn test_multiline_reply_is_untouched() {
    let text = "  Water weekly.\n\n- Check drainage\n- Skip in winter\n";
    let advisor = PlantAdvisor::new(Arc::new(ScriptedClient::new().reply(text)));
    assert_eq!(advisor.get_advice("Watering?", Some(&monstera())).await, text);
}

#[tokio::test]
async fn test_empty_reply_uses_unprocessable_fallback() {
    let advisor = PlantAdvisor::new(Arc::new(ScriptedClient::new().reply("")));
    let reply = advisor.get_advice("Is it toxic?", None).await;
    assert_eq!(reply, "I'm sorry, I couldn't process that question.");
}

#[tokio::test]
async fn test_whitespace_reply_is_returned_as_is() {
    let advisor = PlantAdvisor::new(Arc::new(ScriptedClient::new().reply(" \n")));

    let advice = advisor.consult("Q?", None).await;
    assert_eq!(advice, Advice::Answer(" \n".to_string()));
    assert_eq!(advice.into_text(), " \n");
}

#[tokio::test]
async fn test_empty_response_error_uses_unprocessable_fallback() {
    let client = ScriptedClient::new().fail(FloraError::EmptyResponse("no text".into()));
    let advisor = PlantAdvisor::new(Arc::new(client));

    let advice = advisor.consult("Is it toxic?", None).await;
    assert_eq!(advice, Advice::Unprocessable);
    assert_eq!(advice.text(), UNPROCESSABLE_REPLY);
}

#[tokio::test]
async fn test_provider_error_uses_error_fallback() {
    let client = ScriptedClient::new().fail(FloraError::Timeout);
    let advisor = PlantAdvisor::new(Arc::new(client));

    let reply = advisor.get_advice("Why are the leaves yellow?", None).await;
    assert_eq!(reply, "I encountered an error while thinking. Please try again.");
}

#[tokio::test]
async fn test_fallbacks_stay_distinguishable() {
    let client = ScriptedClient::new()
        .reply("")
        .fail(FloraError::ApiError("quota exceeded".into()));
    let advisor = PlantAdvisor::new(Arc::new(client));

    let empty = advisor.consult("first", None).await;
    let failed = advisor.consult("second", None).await;

    assert_eq!(empty, Advice::Unprocessable);
    assert_eq!(failed, Advice::Failed(FailureKind::TransportFailure));
    assert_ne!(empty.text(), failed.text());
    assert_eq!(failed.text(), ERROR_REPLY);
}

#[tokio::test]
async fn test_system_instruction_names_the_plant() {
    let client = Arc::new(ScriptedClient::new().reply("Every 7-10 days."));
    let advisor = PlantAdvisor::new(client.clone());

    advisor
        .get_advice("How often should I water?", Some(&monstera()))
        .await;

    let request = client.last_request();
    assert_eq!(request.model.as_deref(), Some("gemini-3-flash-preview"));
    assert_eq!(
        request.text_parts().collect::<Vec<_>>(),
        vec!["How often should I water?"]
    );
    assert!(request.response_schema.is_none());
    assert_eq!(
        request.system_instruction.as_deref(),
        Some(
            "You are Flora, an expert botanist. The user is asking about their Monstera (Monstera deliciosa). Provide concise, helpful gardening advice."
        )
    );
}

#[tokio::test]
async fn test_generic_persona_without_context() {
    let client = Arc::new(ScriptedClient::new().reply("Most succulents like sun."));
    let advisor = PlantAdvisor::new(client.clone()).model("gemini-2.5-flash");

    advisor.get_advice("Do succulents need sun?", None).await;

    let request = client.last_request();
    assert_eq!(request.model.as_deref(), Some("gemini-2.5-flash"));
    assert_eq!(
        request.system_instruction.as_deref(),
        Some("You are Flora, an expert botanist. Provide concise, helpful gardening advice.")
    );
}
