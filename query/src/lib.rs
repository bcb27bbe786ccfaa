pub mod error;
pub mod mode;
pub mod operation;

pub use error::{QueryError, Result};
pub use mode::Mode;
pub use operation::{max, min, product, sum, xor, BitXor, Max, Min, Product, Sum};

/// モノイドの性質を満たす二項演算
///
/// # モノイドであるための条件
/// * 任意の元`a,b,c`に対して、`(a * b) * c = a * (b * c)`が成り立つ。(結合則)
/// * ある元`e`が存在して、任意の元`a`に対して、`e * a = a * e = a`が成り立つ。(単位元の存在)
pub trait Monoid {
    type Element: Clone;

    fn identity(&self) -> Self::Element;

    fn op(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    fn op_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.op(a, b);
    }
}

impl<M: Monoid> Monoid for &M {
    type Element = M::Element;

    fn identity(&self) -> Self::Element {
        (*self).identity()
    }

    fn op(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        (*self).op(a, b)
    }

    fn op_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        (*self).op_assign(a, b);
    }
}

/// 逆演算を持つモノイド
///
/// 実行時に演算を選ぶ[`Mode`]では逆元が存在しない場合があるので、失敗しうる。
pub trait Group: Monoid {
    /// `self.op(part, &x) == *total`を満たす`x`を返す。
    fn op_inv(&self, total: &Self::Element, part: &Self::Element) -> Result<Self::Element>;
}

impl<G: Group> Group for &G {
    fn op_inv(&self, total: &Self::Element, part: &Self::Element) -> Result<Self::Element> {
        (*self).op_inv(total, part)
    }
}

/// 区間への一括作用
///
/// # 満たすべき条件
/// * 長さ`len`の区間の集約値`v`に`apply(v, f, len)`した結果は、区間の各要素に`f`を作用させてから集約した値に等しい。
/// * `compose(g, f)`の後に`g`を作用させることは、古い`g`を作用させてから`f`を作用させることに等しい。
pub trait Act: Monoid {
    type Action: Clone;

    fn identity_action(&self) -> Self::Action;

    fn apply(&self, value: &mut Self::Element, f: &Self::Action, len: usize);

    fn compose(&self, pending: &mut Self::Action, f: &Self::Action);
}

impl<A: Act> Act for &A {
    type Action = A::Action;

    fn identity_action(&self) -> Self::Action {
        (*self).identity_action()
    }

    fn apply(&self, value: &mut Self::Element, f: &Self::Action, len: usize) {
        (*self).apply(value, f, len);
    }

    fn compose(&self, pending: &mut Self::Action, f: &Self::Action) {
        (*self).compose(pending, f);
    }
}
