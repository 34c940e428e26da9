/// Generate a view client method: build the request with a oneshot reply
/// channel, send it to the view task and await the answer. Channel failures
/// become `ViewError::ActorCommunicationError`.
#[macro_export]
macro_rules! view_client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        #[allow(dead_code)]
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $crate::error::ViewError> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| $crate::error::ViewError::ActorCommunicationError("View closed".to_string()))?;

                response
                    .await
                    .map_err(|_| $crate::error::ViewError::ActorCommunicationError("View dropped".to_string()))
            }
        }
    };
}
