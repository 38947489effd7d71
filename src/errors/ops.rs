use std::fmt::{self, Display};

/// 张量运算符（用于错误提示）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    MatMul,
    BroadcastAdd,
    Mean,
}
impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operation_name = match self {
            Operator::Add => "相加",
            Operator::Sub => "相减",
            Operator::Mul => "逐元素相乘",
            Operator::MatMul => "矩阵乘法",
            Operator::BroadcastAdd => "按行广播相加",
            Operator::Mean => "求均值",
        };
        write!(f, "{}", operation_name)
    }
}
