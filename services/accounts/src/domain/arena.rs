//! Id-keyed storage with bidirectional association maintenance.
//!
//! Entities reference each other by stable ids instead of live references,
//! and one component — [`AccountArena`] — keeps the owning side
//! (`published_by` / `by_user` on the related entity) consistent with the
//! inverse side (the id sets on [`User`]). This mirrors the unit-of-work an
//! ORM provides per transaction; the arena is single-threaded and raises no
//! errors: operations on unknown ids are silent no-ops, and constraint
//! violations are the storage layer's concern.

use std::collections::BTreeMap;

use vitrine_domain::id::{AddressId, OrderId, ProductId, ReportId, UserId, VerificationId};

use crate::domain::types::{Address, Order, Product, ProductReport, User, UserVerification};

#[derive(Debug, Default)]
pub struct AccountArena {
    users: BTreeMap<UserId, User>,
    products: BTreeMap<ProductId, Product>,
    orders: BTreeMap<OrderId, Order>,
    reports: BTreeMap<ReportId, ProductReport>,
    addresses: BTreeMap<AddressId, Address>,
    verifications: BTreeMap<VerificationId, UserVerification>,
    next_id: i64,
}

impl AccountArena {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    // ── Insertion ────────────────────────────────────────────────────────────

    /// Insert a user record, assigning its id. The id never changes afterwards.
    pub fn insert_user(&mut self, mut user: User) -> UserId {
        let id = UserId(self.next_id());
        user.id = Some(id);
        self.users.insert(id, user);
        id
    }

    /// Insert a product. Ownership is established through [`add_product`];
    /// a pre-set `published_by` is cleared.
    ///
    /// [`add_product`]: Self::add_product
    pub fn insert_product(&mut self, mut product: Product) -> ProductId {
        let id = ProductId(self.next_id());
        product.id = Some(id);
        product.published_by = None;
        self.products.insert(id, product);
        id
    }

    /// Insert an order. Ownership is established through [`add_order`].
    ///
    /// [`add_order`]: Self::add_order
    pub fn insert_order(&mut self, mut order: Order) -> OrderId {
        let id = OrderId(self.next_id());
        order.id = Some(id);
        order.by_user = None;
        self.orders.insert(id, order);
        id
    }

    /// Insert a product report. Ownership is established through [`add_report`].
    ///
    /// [`add_report`]: Self::add_report
    pub fn insert_report(&mut self, mut report: ProductReport) -> ReportId {
        let id = ReportId(self.next_id());
        report.id = Some(id);
        report.by_user = None;
        self.reports.insert(id, report);
        id
    }

    // ── Lookup ───────────────────────────────────────────────────────────────

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn user_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    pub fn report(&self, id: ReportId) -> Option<&ProductReport> {
        self.reports.get(&id)
    }

    pub fn address(&self, id: AddressId) -> Option<&Address> {
        self.addresses.get(&id)
    }

    pub fn verification(&self, id: VerificationId) -> Option<&UserVerification> {
        self.verifications.get(&id)
    }

    // ── Bidirectional one-to-many maintenance ────────────────────────────────
    //
    // add: insert into the user's set unless already present, then point the
    // entity's owner field at the user. Idempotent.
    //
    // remove: drop from the user's set; clear the entity's owner field only
    // if it still points at this user. A removal that races a reassignment
    // must not clobber the new owner.

    pub fn add_product(&mut self, user: UserId, product: ProductId) {
        if !self.products.contains_key(&product) {
            return;
        }
        let Some(record) = self.users.get_mut(&user) else {
            return;
        };
        if record.products.insert(product) {
            if let Some(p) = self.products.get_mut(&product) {
                p.published_by = Some(user);
            }
        }
    }

    pub fn remove_product(&mut self, user: UserId, product: ProductId) {
        let Some(record) = self.users.get_mut(&user) else {
            return;
        };
        if record.products.remove(&product) {
            if let Some(p) = self.products.get_mut(&product) {
                if p.published_by == Some(user) {
                    p.published_by = None;
                }
            }
        }
    }

    pub fn add_order(&mut self, user: UserId, order: OrderId) {
        if !self.orders.contains_key(&order) {
            return;
        }
        let Some(record) = self.users.get_mut(&user) else {
            return;
        };
        if record.orders.insert(order) {
            if let Some(o) = self.orders.get_mut(&order) {
                o.by_user = Some(user);
            }
        }
    }

    pub fn remove_order(&mut self, user: UserId, order: OrderId) {
        let Some(record) = self.users.get_mut(&user) else {
            return;
        };
        if record.orders.remove(&order) {
            if let Some(o) = self.orders.get_mut(&order) {
                if o.by_user == Some(user) {
                    o.by_user = None;
                }
            }
        }
    }

    pub fn add_report(&mut self, user: UserId, report: ReportId) {
        if !self.reports.contains_key(&report) {
            return;
        }
        let Some(record) = self.users.get_mut(&user) else {
            return;
        };
        if record.reports.insert(report) {
            if let Some(r) = self.reports.get_mut(&report) {
                r.by_user = Some(user);
            }
        }
    }

    pub fn remove_report(&mut self, user: UserId, report: ReportId) {
        let Some(record) = self.users.get_mut(&user) else {
            return;
        };
        if record.reports.remove(&report) {
            if let Some(r) = self.reports.get_mut(&report) {
                if r.by_user == Some(user) {
                    r.by_user = None;
                }
            }
        }
    }

    // ── Exclusively-owned one-to-one relations ───────────────────────────────

    /// Attach an address to a user, replacing any previous one. The replaced
    /// row is deleted — exclusive ownership leaves no orphans.
    pub fn set_address(&mut self, user: UserId, mut address: Address) -> Option<AddressId> {
        let id = AddressId(self.next_id());
        let record = self.users.get_mut(&user)?;
        let previous = record.address.replace(id);
        address.id = Some(id);
        self.addresses.insert(id, address);
        if let Some(old) = previous {
            self.addresses.remove(&old);
        }
        Some(id)
    }

    pub fn clear_address(&mut self, user: UserId) {
        let Some(record) = self.users.get_mut(&user) else {
            return;
        };
        if let Some(old) = record.address.take() {
            self.addresses.remove(&old);
        }
    }

    /// Attach a verification record to a user, replacing any previous one.
    pub fn set_verification(
        &mut self,
        user: UserId,
        mut verification: UserVerification,
    ) -> Option<VerificationId> {
        let id = VerificationId(self.next_id());
        let record = self.users.get_mut(&user)?;
        let previous = record.verification.replace(id);
        verification.id = Some(id);
        self.verifications.insert(id, verification);
        if let Some(old) = previous {
            self.verifications.remove(&old);
        }
        Some(id)
    }

    pub fn clear_verification(&mut self, user: UserId) {
        let Some(record) = self.users.get_mut(&user) else {
            return;
        };
        if let Some(old) = record.verification.take() {
            self.verifications.remove(&old);
        }
    }

    // ── Account deletion ─────────────────────────────────────────────────────

    /// Delete a user: owned address/verification rows go with it, and every
    /// related entity whose owner field still points at this user is unset.
    /// Entities reassigned to another owner are left untouched.
    pub fn remove_user(&mut self, user: UserId) -> Option<User> {
        let record = self.users.remove(&user)?;
        if let Some(address) = record.address {
            self.addresses.remove(&address);
        }
        if let Some(verification) = record.verification {
            self.verifications.remove(&verification);
        }
        for p in self.products.values_mut() {
            if p.published_by == Some(user) {
                p.published_by = None;
            }
        }
        for o in self.orders.values_mut() {
            if o.by_user == Some(user) {
                o.by_user = None;
            }
        }
        for r in self.reports.values_mut() {
            if r.by_user == Some(user) {
                r.by_user = None;
            }
        }
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Address, Order, Product, ProductReport, User, UserVerification};

    fn arena_with_user(username: &str) -> (AccountArena, UserId) {
        let mut arena = AccountArena::new();
        let id = arena.insert_user(User::new().with_username(username));
        (arena, id)
    }

    #[test]
    fn insert_assigns_an_id_and_keeps_it() {
        let (arena, alice) = arena_with_user("alice");
        assert_eq!(arena.user(alice).unwrap().id, Some(alice));
    }

    #[test]
    fn add_product_sets_the_owner() {
        let (mut arena, alice) = arena_with_user("alice");
        let p = arena.insert_product(Product::new("lamp"));
        arena.add_product(alice, p);
        assert_eq!(arena.product(p).unwrap().published_by, Some(alice));
        assert!(arena.user(alice).unwrap().products.contains(&p));
    }

    #[test]
    fn add_product_twice_is_idempotent() {
        let (mut arena, alice) = arena_with_user("alice");
        let p = arena.insert_product(Product::new("lamp"));
        arena.add_product(alice, p);
        let size = arena.user(alice).unwrap().products.len();
        arena.add_product(alice, p);
        assert_eq!(arena.user(alice).unwrap().products.len(), size);
    }

    #[test]
    fn remove_product_clears_the_owner_and_the_set() {
        let (mut arena, alice) = arena_with_user("alice");
        let p = arena.insert_product(Product::new("lamp"));
        arena.add_product(alice, p);
        arena.remove_product(alice, p);
        assert_eq!(arena.product(p).unwrap().published_by, None);
        assert!(!arena.user(alice).unwrap().products.contains(&p));
    }

    #[test]
    fn stale_remove_does_not_clobber_the_new_owner() {
        let (mut arena, alice) = arena_with_user("alice");
        let bob = arena.insert_user(User::new().with_username("bob"));
        let p = arena.insert_product(Product::new("lamp"));
        arena.add_product(alice, p);
        // Reassignment leaves alice's set stale until she removes.
        arena.add_product(bob, p);
        assert_eq!(arena.product(p).unwrap().published_by, Some(bob));

        arena.remove_product(alice, p);
        assert_eq!(arena.product(p).unwrap().published_by, Some(bob));
        assert!(!arena.user(alice).unwrap().products.contains(&p));
        assert!(arena.user(bob).unwrap().products.contains(&p));
    }

    #[test]
    fn orders_follow_the_same_add_remove_rules() {
        let (mut arena, alice) = arena_with_user("alice");
        let o = arena.insert_order(Order::new("ORD-0001"));
        arena.add_order(alice, o);
        assert_eq!(arena.order(o).unwrap().by_user, Some(alice));
        arena.add_order(alice, o);
        assert_eq!(arena.user(alice).unwrap().orders.len(), 1);
        arena.remove_order(alice, o);
        assert_eq!(arena.order(o).unwrap().by_user, None);
    }

    #[test]
    fn reports_follow_the_same_add_remove_rules() {
        let (mut arena, alice) = arena_with_user("alice");
        let p = arena.insert_product(Product::new("lamp"));
        let r = arena.insert_report(ProductReport::new(p, "counterfeit"));
        arena.add_report(alice, r);
        assert_eq!(arena.report(r).unwrap().by_user, Some(alice));
        arena.remove_report(alice, r);
        assert_eq!(arena.report(r).unwrap().by_user, None);
    }

    #[test]
    fn replacing_an_address_leaves_no_orphan() {
        let (mut arena, alice) = arena_with_user("alice");
        let first = arena
            .set_address(
                alice,
                Address {
                    id: None,
                    street: "1 rue de la Paix".into(),
                    city: "Paris".into(),
                    postal_code: "75002".into(),
                    country: "FR".into(),
                },
            )
            .unwrap();
        let second = arena
            .set_address(
                alice,
                Address {
                    id: None,
                    street: "5 quai Saint-Antoine".into(),
                    city: "Lyon".into(),
                    postal_code: "69002".into(),
                    country: "FR".into(),
                },
            )
            .unwrap();
        assert!(arena.address(first).is_none());
        assert_eq!(arena.user(alice).unwrap().address, Some(second));
        assert_eq!(arena.address(second).unwrap().city, "Lyon");
    }

    #[test]
    fn clearing_a_verification_deletes_the_row() {
        let (mut arena, alice) = arena_with_user("alice");
        let v = arena
            .set_verification(
                alice,
                UserVerification {
                    id: None,
                    code: "cafe-1234".into(),
                    verified: false,
                },
            )
            .unwrap();
        arena.clear_verification(alice);
        assert!(arena.verification(v).is_none());
        assert!(arena.user(alice).unwrap().verification.is_none());
    }

    #[test]
    fn removing_a_user_cascades_to_owned_rows_and_unsets_inverse_owners() {
        let (mut arena, alice) = arena_with_user("alice");
        let bob = arena.insert_user(User::new().with_username("bob"));
        let a = arena
            .set_address(
                alice,
                Address {
                    id: None,
                    street: "1 rue de la Paix".into(),
                    city: "Paris".into(),
                    postal_code: "75002".into(),
                    country: "FR".into(),
                },
            )
            .unwrap();
        let mine = arena.insert_product(Product::new("lamp"));
        let theirs = arena.insert_product(Product::new("chair"));
        arena.add_product(alice, mine);
        arena.add_product(bob, theirs);
        let o = arena.insert_order(Order::new("ORD-0001"));
        arena.add_order(alice, o);

        let removed = arena.remove_user(alice).unwrap();
        assert_eq!(removed.username.as_deref(), Some("alice"));
        assert!(arena.user(alice).is_none());
        assert!(arena.address(a).is_none());
        assert_eq!(arena.product(mine).unwrap().published_by, None);
        assert_eq!(arena.product(theirs).unwrap().published_by, Some(bob));
        assert_eq!(arena.order(o).unwrap().by_user, None);
    }

    #[test]
    fn operations_on_unknown_ids_are_no_ops() {
        let (mut arena, alice) = arena_with_user("alice");
        arena.add_product(alice, ProductId(999));
        assert!(arena.user(alice).unwrap().products.is_empty());
        arena.remove_product(UserId(999), ProductId(999));
        arena.clear_address(UserId(999));
        assert!(arena.remove_user(UserId(999)).is_none());
    }
}
