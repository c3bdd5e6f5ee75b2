use vitrine_domain::id::{ProductId, UserId};
use vitrine_domain::pagination::PageRequest;

use crate::domain::repository::ProductRepository;
use crate::domain::types::Product;
use crate::error::AccountsServiceError;

// ── PublishProduct ───────────────────────────────────────────────────────────

pub struct PublishProductInput {
    pub title: String,
    pub publisher: UserId,
}

pub struct PublishProductUseCase<P: ProductRepository> {
    pub products: P,
}

impl<P: ProductRepository> PublishProductUseCase<P> {
    /// Create a listing and attach it to its publisher in one go.
    pub async fn execute(
        &self,
        input: PublishProductInput,
    ) -> Result<ProductId, AccountsServiceError> {
        let id = self.products.create(&input.title).await?;
        self.products.assign_owner(id, input.publisher).await?;
        Ok(id)
    }
}

// ── ClaimProduct ─────────────────────────────────────────────────────────────

pub struct ClaimProductUseCase<P: ProductRepository> {
    pub products: P,
}

impl<P: ProductRepository> ClaimProductUseCase<P> {
    /// Point an existing listing at a new publisher. Idempotent when the
    /// listing already belongs to the user.
    pub async fn execute(
        &self,
        product: ProductId,
        user: UserId,
    ) -> Result<(), AccountsServiceError> {
        if self.products.find_by_id(product).await?.is_none() {
            return Err(AccountsServiceError::ProductNotFound);
        }
        self.products.assign_owner(product, user).await
    }
}

// ── ReleaseProduct ───────────────────────────────────────────────────────────

pub struct ReleaseProductUseCase<P: ProductRepository> {
    pub products: P,
}

impl<P: ProductRepository> ReleaseProductUseCase<P> {
    /// Detach a listing from a publisher. Returns `false` without touching
    /// anything when the listing has already been reassigned to someone else.
    pub async fn execute(
        &self,
        product: ProductId,
        user: UserId,
    ) -> Result<bool, AccountsServiceError> {
        if self.products.find_by_id(product).await?.is_none() {
            return Err(AccountsServiceError::ProductNotFound);
        }
        self.products.release_owner(product, user).await
    }
}

// ── ListUserProducts ─────────────────────────────────────────────────────────

pub struct ListUserProductsUseCase<P: ProductRepository> {
    pub products: P,
}

impl<P: ProductRepository> ListUserProductsUseCase<P> {
    pub async fn execute(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<Vec<Product>, AccountsServiceError> {
        self.products.list_by_user(user, page.clamped()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct MockProductRepo {
        existing: Option<Product>,
        owner: Mutex<Option<UserId>>,
    }

    impl MockProductRepo {
        fn with_product(owner: Option<UserId>) -> Self {
            Self {
                existing: Some(Product {
                    id: Some(ProductId(7)),
                    title: "lamp".into(),
                    published_by: owner,
                }),
                owner: Mutex::new(owner),
            }
        }

        fn empty() -> Self {
            Self {
                existing: None,
                owner: Mutex::new(None),
            }
        }
    }

    impl ProductRepository for MockProductRepo {
        async fn create(&self, _title: &str) -> Result<ProductId, AccountsServiceError> {
            Ok(ProductId(7))
        }
        async fn find_by_id(
            &self,
            _id: ProductId,
        ) -> Result<Option<Product>, AccountsServiceError> {
            Ok(self.existing.clone())
        }
        async fn assign_owner(
            &self,
            _product: ProductId,
            user: UserId,
        ) -> Result<(), AccountsServiceError> {
            *self.owner.lock().unwrap() = Some(user);
            Ok(())
        }
        async fn release_owner(
            &self,
            _product: ProductId,
            user: UserId,
        ) -> Result<bool, AccountsServiceError> {
            let mut owner = self.owner.lock().unwrap();
            if *owner == Some(user) {
                *owner = None;
                Ok(true)
            } else {
                Ok(false)
            }
        }
        async fn list_by_user(
            &self,
            _user: UserId,
            _page: PageRequest,
        ) -> Result<Vec<Product>, AccountsServiceError> {
            Ok(self.existing.clone().into_iter().collect())
        }
    }

    #[tokio::test]
    async fn should_publish_and_attach_to_publisher() {
        let repo = MockProductRepo::with_product(None);
        let usecase = PublishProductUseCase { products: repo };
        let id = usecase
            .execute(PublishProductInput {
                title: "lamp".into(),
                publisher: UserId(1),
            })
            .await
            .unwrap();
        assert_eq!(id, ProductId(7));
        assert_eq!(*usecase.products.owner.lock().unwrap(), Some(UserId(1)));
    }

    #[tokio::test]
    async fn should_reject_claim_of_unknown_product() {
        let usecase = ClaimProductUseCase {
            products: MockProductRepo::empty(),
        };
        let result = usecase.execute(ProductId(7), UserId(1)).await;
        assert!(matches!(
            result,
            Err(AccountsServiceError::ProductNotFound)
        ));
    }

    #[tokio::test]
    async fn should_release_when_owner_matches() {
        let usecase = ReleaseProductUseCase {
            products: MockProductRepo::with_product(Some(UserId(1))),
        };
        let released = usecase.execute(ProductId(7), UserId(1)).await.unwrap();
        assert!(released);
    }

    #[tokio::test]
    async fn should_not_release_after_reassignment() {
        let usecase = ReleaseProductUseCase {
            products: MockProductRepo::with_product(Some(UserId(2))),
        };
        let released = usecase.execute(ProductId(7), UserId(1)).await.unwrap();
        assert!(!released);
        assert_eq!(*usecase.products.owner.lock().unwrap(), Some(UserId(2)));
    }
}
