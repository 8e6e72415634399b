use async_graphql::ErrorExtensions;

use crate::Error;

impl ErrorExtensions for Error {
    /// Convert the error into a GraphQL error with a `code` extension.
    ///
    /// Errors caused by the request keep their message, internal errors are
    /// logged and replaced with a generic message.
    fn extend(&self) -> async_graphql::Error {
        let (message, code) = match self {
            Error::NotFound
            | Error::UpdateMissingAutoTransaction
            | Error::DeleteMissingAutoTransaction => (self.to_string(), "NOT_FOUND"),
            Error::EmptyDescription
            | Error::InvalidTransactionType(_)
            | Error::InvalidId(_)
            | Error::InvalidReference => (self.to_string(), "BAD_USER_INPUT"),
            Error::SqlError(_) | Error::DatabaseLockError => {
                tracing::error!("An unexpected error occurred in a GraphQL resolver: {self}");
                (
                    "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                    "INTERNAL_SERVER_ERROR",
                )
            }
        };

        async_graphql::Error::new(message).extend_with(|_, extensions| {
            extensions.set("code", code);
        })
    }
}
