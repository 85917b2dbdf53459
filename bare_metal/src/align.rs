/// Something (sizes, offsets, cursor columns) that can be rounded up to a power of two.
pub trait Alignable {
    type Alignment;

    /// Return the smallest `x` that is a multiple of `alignment` such that `x >= num`.
    /// An alignment of zero leaves the value unchanged.
    fn align_up(self, alignment: Self::Alignment) -> Self;
}

macro_rules! align_up_impl {
    ($num:ident, $alignment:ident) => {
        if $alignment == 0 {
            $num
        } else {
            let mask = $alignment - 1;
            assert!($alignment & mask == 0, "alignment must be power of two");
            let padding = $alignment - ($num & mask);
            $num + (padding & mask)
        }
    };
}

macro_rules! impl_alignable {
    ($int:ty) => {
        impl Alignable for $int {
            type Alignment = $int;
            fn align_up(self, alignment: Self) -> Self { align_up_impl!(self, alignment) }
        }
    };
}

impl_alignable!(usize);
impl_alignable!(u64);
impl_alignable!(u32);
