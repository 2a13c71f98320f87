use flow_forest::context::ContextError;

#[test]
fn shader_error_message_carries_the_validation_text() {
    let error = ContextError::ShaderCompilation("no definition in scope for identifier: `oops`".into());
    assert_eq!(
        error.to_string(),
        "compilation error in shader: no definition in scope for identifier: `oops`"
    );
}

#[test]
fn missing_adapter_message_says_what_went_wrong() {
    let cause = wgpu::RequestAdapterError::EnvNotSet;
    let error = ContextError::from(cause.clone());
    assert!(matches!(error, ContextError::NoAdapter(_)));
    assert_eq!(
        error.to_string(),
        format!(
            "GPU rendering is supported, but no suitable adapter was found ({})",
            cause
        )
    );
}

#[test]
fn messages_are_single_line() {
    let errors = [
        ContextError::ShaderCompilation("bad token".into()),
        ContextError::NoAdapter(wgpu::RequestAdapterError::EnvNotSet),
    ];
    for error in errors {
        let message = error.to_string();
        assert!(!message.is_empty());
        assert!(!message.contains('\n'), "{:?}", message);
    }
}
