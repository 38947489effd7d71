/*
 * @Date         : 2026-10-19
 * @Description  : RMSprop 优化器测试
 */

use approx::assert_abs_diff_eq;

use crate::nn::optimizer::{Optimizer, RMSprop};
use crate::nn::{Module, NnError, Parameter};
use crate::tensor::Tensor;

/// 只含一个 [1, 1] 参数的最小模块
struct Scalar {
    w: Parameter,
    frozen: Parameter,
}

impl Scalar {
    fn new(w: f32) -> Self {
        Self {
            w: Parameter::new("w", Tensor::new(&[w], &[1, 1]).unwrap()),
            frozen: Parameter::new("frozen", Tensor::new(&[5.0], &[1, 1]).unwrap()),
        }
    }

    fn w(&self) -> f32 {
        self.w.value().to_number().unwrap()
    }

    fn set_grad(&mut self, g: f32) {
        self.w.zero_grad();
        self.w
            .accumulate_grad(&Tensor::new(&[g], &[1, 1]).unwrap())
            .unwrap();
    }
}

impl Module for Scalar {
    fn parameters(&self) -> Vec<&Parameter> {
        vec![&self.w, &self.frozen]
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        vec![&mut self.w, &mut self.frozen]
    }
}

#[test]
fn test_rmsprop_creation() {
    let opt = RMSprop::new_default(5e-5).unwrap();
    assert_eq!(opt.learning_rate(), 5e-5);
    assert_eq!(opt.step_count(), 0);
    let state = opt.state_dict();
    assert_eq!(state.alpha, 0.99);
    assert_eq!(state.epsilon, 1e-8);
    assert!(state.square_avg.is_empty());
}

#[test]
fn test_rmsprop_invalid_hyper_parameters() {
    assert!(matches!(
        RMSprop::new(-1.0, 0.99, 1e-8),
        Err(NnError::InvalidHyperParameter(_))
    ));
    assert!(RMSprop::new(0.1, 1.0, 1e-8).is_err());
    assert!(RMSprop::new(0.1, 0.99, 0.0).is_err());
}

#[test]
fn test_rmsprop_update() {
    // 预期值按 PyTorch RMSprop 公式手算（alpha=0.99, eps=1e-8, lr=0.1）：
    // 第1步 g=3:  v = 0.01 * 9 = 0.09,  w = 2 - 0.1 * 3 / 0.3 = 1.0
    // 第2步 g=3:  v = 0.99 * 0.09 + 0.01 * 9 = 0.1791,  w = 1 - 0.3 / √0.1791 ≈ 0.291117
    let mut module = Scalar::new(2.0);
    let mut opt = RMSprop::new_default(0.1).unwrap();

    module.set_grad(3.0);
    opt.step(&mut module).unwrap();
    assert_abs_diff_eq!(module.w(), 1.0, epsilon = 1e-4);
    let v = opt.state_dict().square_avg["w"].to_number().unwrap();
    assert_abs_diff_eq!(v, 0.09, epsilon = 1e-6);

    module.set_grad(3.0);
    opt.step(&mut module).unwrap();
    assert_abs_diff_eq!(module.w(), 0.291117, epsilon = 1e-4);
    assert_eq!(opt.step_count(), 2);

    // 没有梯度的参数不更新，也不产生统计量
    assert_eq!(module.frozen.value().to_number(), Some(5.0));
    assert!(!opt.state_dict().square_avg.contains_key("frozen"));
}

#[test]
fn test_rmsprop_state_restore_continues_identically() {
    let mut module_a = Scalar::new(1.0);
    let mut opt_a = RMSprop::new_default(0.05).unwrap();
    for g in [0.5, -1.0, 2.0] {
        module_a.set_grad(g);
        opt_a.step(&mut module_a).unwrap();
    }

    // 复制模块参数与优化器状态到一组新对象
    let mut module_b = Scalar::new(0.0);
    module_b.load_state_dict(&module_a.state_dict()).unwrap();
    let mut opt_b = RMSprop::new_default(0.05).unwrap();
    opt_b.load_state_dict(opt_a.state_dict(), &module_b).unwrap();
    assert_eq!(opt_b.state_dict(), opt_a.state_dict());

    for g in [0.7, -0.3] {
        module_a.set_grad(g);
        module_b.set_grad(g);
        opt_a.step(&mut module_a).unwrap();
        opt_b.step(&mut module_b).unwrap();
    }
    assert_eq!(module_a.w(), module_b.w());

    // 若只恢复学习率而丢弃统计量，轨迹就会不同
    let mut module_c = Scalar::new(0.0);
    let mut opt_c = RMSprop::new_default(0.05).unwrap();
    module_c.load_state_dict(&module_b.state_dict()).unwrap();
    module_c.set_grad(0.1);
    module_b.set_grad(0.1);
    opt_c.step(&mut module_c).unwrap();
    opt_b.step(&mut module_b).unwrap();
    assert_ne!(module_b.w(), module_c.w());
}

#[test]
fn test_rmsprop_load_state_validates_against_module() {
    let module = Scalar::new(1.0);
    let mut opt = RMSprop::new_default(0.1).unwrap();

    let mut state = opt.state_dict();
    state
        .square_avg
        .insert("ghost".to_string(), Tensor::zeros(&[1, 1]));
    assert_eq!(
        opt.load_state_dict(state, &module).unwrap_err(),
        NnError::UnexpectedParameter("ghost".to_string())
    );

    let mut state = opt.state_dict();
    state.square_avg.insert("w".to_string(), Tensor::zeros(&[2, 2]));
    assert!(matches!(
        opt.load_state_dict(state, &module),
        Err(NnError::ParameterShape { .. })
    ));

    let mut state = opt.state_dict();
    state.alpha = 2.0;
    assert!(opt.load_state_dict(state, &module).is_err());
    assert_eq!(opt.state_dict().alpha, 0.99);
}
