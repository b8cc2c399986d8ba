use immo_gradio::error::GradioError;
use immo_gradio::predict::{GenerationParams, PREDICT_ENDPOINT, SPACE_ID, extract_reply};
use serde_json::json;

#[test]
fn generation_params_are_fixed() {
    let params = GenerationParams::default();
    assert_eq!(params.tokens_max, 1000);
    assert_eq!(params.temperature, 0.1);
    assert_eq!(params.top_p, 0.1);
    assert_eq!(SPACE_ID, "DmbOran/Assistant_Immo");
    assert_eq!(PREDICT_ENDPOINT, "/predict");
}

#[test]
fn data_array_is_positional() {
    let data = GenerationParams::FIXED.to_data("Un F3 à Oran ?");
    assert_eq!(data, json!(["Un F3 à Oran ?", 1000, 0.1, 0.1]));
}

#[test]
fn first_element_of_sequence_is_the_reply() {
    assert_eq!(extract_reply(json!(["Hello"])).unwrap(), json!("Hello"));
    assert_eq!(extract_reply(json!(["Hello", "ignored"])).unwrap(), json!("Hello"));
}

#[test]
fn scalar_result_is_the_reply() {
    assert_eq!(extract_reply(json!("Hi")).unwrap(), json!("Hi"));
    assert_eq!(extract_reply(json!({"text": "Hi"})).unwrap(), json!({"text": "Hi"}));
}

#[test]
fn null_and_empty_results_are_malformed() {
    for result in [json!(null), json!([]), json!([null])] {
        assert!(
            matches!(extract_reply(result.clone()), Err(GradioError::ResponseParse(_))),
            "expected malformed result for {result}"
        );
    }
}
