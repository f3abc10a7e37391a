use super::*;
use std::time::Instant;

/// The classical Armijo-type sufficient-decrease test shared by the
/// gradient fast path, the shortened-step probe and the full-bundle inner
/// loop. `prefactor` is the active step's own scale (`gradient_stepsize`,
/// `alpha_s`, or `1.0` once the step magnitude is already folded into
/// `direction`) — the full-bundle test omits the gradient fast path's
/// `gradient_stepsize` factor for exactly that reason, not by oversight.
fn sufficient_decrease(
    options: &DirectionOptions,
    prefactor: Floating,
    f_trial: Floating,
    f_x_k: Floating,
    qp: &dyn QpSolver,
) -> bool {
    let q_dual = qp.dual_objective_quadratic_value();
    let n_comb = qp.combination_translated_norm2_squared();
    let n_prim = qp.primal_solution_norm2_squared();
    let predicted_reduction = q_dual.min(n_comb.max(n_prim));
    f_trial - f_x_k < -options.step_acceptance_tolerance() * prefactor * predicted_reduction
}

fn convert_qp_solution_to_step(quantities: &mut Quantities, qp: &dyn QpSolver, x_k: &DVector<Floating>) {
    quantities.direction = qp.primal_solution().clone();
    quantities.trial_iterate = Iterate::new(x_k + &quantities.direction);
}

#[allow(clippy::too_many_arguments)]
fn finish(
    status: DirectionStatus,
    quantities: &mut Quantities,
    reporter: &mut Reporter,
    qp: &dyn QpSolver,
    started: Instant,
) -> DirectionStatus {
    reporter.push_summary_line(
        *quantities.counters.inner_iteration(),
        qp.vector_list_length(),
        qp.number_of_iterations(),
        qp.status(),
        qp.kkt_error_dual(),
        quantities.direction.inf_norm(),
        qp.dual_objective_quadratic_value(),
    );
    quantities.counters.fold_into_totals(started.elapsed());
    status
}

/// Builds and repeatedly re-solves cutting-plane QPs around `x_k`,
/// orchestrating the gradient/shortened/full step shortcuts, aggregation,
/// and QP-failure recovery described for this core. Never panics on a
/// non-finite objective; that case is reported as
/// `DirectionStatus::EvaluationFailure`.
pub fn compute_direction(
    options: &DirectionOptions,
    quantities: &mut Quantities,
    reporter: &mut Reporter,
    strategies: &mut Strategies,
    oracle: &dyn Oracle,
) -> DirectionStatus {
    let started = Instant::now();
    quantities.counters.reset_inner();
    let n = quantities.number_of_variables;
    quantities.direction = DVector::zeros(n);
    quantities.trial_iterate = quantities.current_iterate.clone();

    // 1. Initialization.
    let joint = quantities.evaluate_function_with_gradient;
    if !quantities
        .current_iterate
        .evaluate_best_available(oracle, joint)
    {
        return finish(
            DirectionStatus::EvaluationFailure,
            quantities,
            reporter,
            strategies.qp_solver.as_ref(),
            started,
        );
    }

    strategies.qp_solver.set_scalar(quantities.trust_region_radius);
    strategies
        .qp_solver
        .set_inexact_solution_tolerance(quantities.stationarity_radius);

    let x_k = quantities.current_iterate.position().clone();
    let f_x_k = quantities
        .current_iterate
        .f()
        .expect("just evaluated above");
    let gradient_x_k = quantities
        .current_iterate
        .g()
        .clone()
        .expect("just evaluated above");

    // 2. Seed bundle.
    let mut bundle = Bundle::seed(Rc::clone(&gradient_x_k), f_x_k);

    // 3. Gradient-step fast path.
    if *options.try_gradient_step() {
        strategies
            .qp_solver
            .set_vector_list(bundle.g.clone(), bundle.b.clone());
        strategies
            .qp_solver
            .solve_qp(strategies.hessian_update.inverse_hessian());

        let eta_g = *options.gradient_stepsize();
        let d = strategies.qp_solver.primal_solution().clone();
        quantities.trial_iterate = Iterate::new(linear_combination(1.0, &x_k, eta_g, &d));
        let eval_ok = quantities.trial_iterate.evaluate_objective(oracle);
        let radii_update = strategies
            .termination
            .check_conditions_direction_computation(quantities, strategies.qp_solver.as_ref());

        let accepted = eval_ok
            && sufficient_decrease(
                options,
                eta_g,
                quantities.trial_iterate.f().expect("just evaluated above"),
                f_x_k,
                strategies.qp_solver.as_ref(),
            );

        if accepted || radii_update {
            quantities.direction = &d * eta_g;
            return finish(
                DirectionStatus::Success,
                quantities,
                reporter,
                strategies.qp_solver.as_ref(),
                started,
            );
        }
    }

    // 4. Initial bundle expansion.
    //
    // Every point ever pushed onto `quantities.point_set` was fully
    // evaluated before being pushed (see step 8.d below), so this never
    // needs to call back into the oracle — it reads the cache.
    let rho = quantities.stationarity_radius;
    let kappa = *options.downshift_constant();
    for p in quantities.point_set.clone().iter() {
        if (&x_k - p.position()).inf_norm() > rho {
            continue;
        }
        if let (Some(f_p), Some(g_p)) = (*p.f(), p.g().clone()) {
            let b_p = downshifted_linear_term(f_p, &g_p, &x_k, p.position(), f_x_k, kappa);
            bundle.push(g_p, b_p);
        }
    }

    // 5. Initial full QP.
    strategies
        .qp_solver
        .set_vector_list(bundle.g.clone(), bundle.b.clone());
    strategies
        .qp_solver
        .solve_qp(strategies.hessian_update.inverse_hessian());
    quantities.counters.bump_inner();
    quantities.counters.bump_qp();
    convert_qp_solution_to_step(quantities, strategies.qp_solver.as_ref(), &x_k);

    // 6. Hard QP failure handling.
    if strategies.qp_solver.status() != QpStatus::Success {
        if *options.fail_on_qp_failure() {
            return finish(
                DirectionStatus::QpFailure,
                quantities,
                reporter,
                strategies.qp_solver.as_ref(),
                started,
            );
        }
        warn!(target: "bundle", "QP solve failed; recovering with the seed cut only");
        bundle = Bundle::seed(Rc::clone(&gradient_x_k), f_x_k);
        strategies
            .qp_solver
            .set_vector_list(bundle.g.clone(), bundle.b.clone());
        strategies
            .qp_solver
            .solve_qp(strategies.hessian_update.inverse_hessian());
        quantities.counters.bump_qp();
        convert_qp_solution_to_step(quantities, strategies.qp_solver.as_ref(), &x_k);
        debug!(target: "bundle", "recovery solve reseeded the bundle to 1 cut");
    }

    // 7. Aggregation state.
    let mut bundle_agg = bundle.clone();
    let mut switched_to_full = false;

    // 8. Inner loop.
    loop {
        quantities.counters.bump_inner();

        // a. Evaluate trial.
        let eval_ok = quantities.trial_iterate.evaluate_objective(oracle);
        let radii_update = strategies
            .termination
            .check_conditions_direction_computation(quantities, strategies.qp_solver.as_ref());

        reporter.push_summary_line(
            *quantities.counters.inner_iteration(),
            strategies.qp_solver.vector_list_length(),
            strategies.qp_solver.number_of_iterations(),
            strategies.qp_solver.status(),
            strategies.qp_solver.kkt_error_dual(),
            quantities.direction.inf_norm(),
            strategies.qp_solver.dual_objective_quadratic_value(),
        );

        let accepted = eval_ok
            && sufficient_decrease(
                options,
                1.0,
                quantities.trial_iterate.f().expect("just evaluated above"),
                f_x_k,
                strategies.qp_solver.as_ref(),
            );
        if accepted || radii_update {
            return finish(
                DirectionStatus::Success,
                quantities,
                reporter,
                strategies.qp_solver.as_ref(),
                started,
            );
        }

        // b. Limits.
        if *quantities.counters.inner_iteration() > *options.inner_iteration_limit() {
            let status = if *options.fail_on_iteration_limit() {
                DirectionStatus::IterationLimit
            } else {
                DirectionStatus::Success
            };
            return finish(status, quantities, reporter, strategies.qp_solver.as_ref(), started);
        }
        if quantities.cpu_time_exhausted() {
            return finish(
                DirectionStatus::CpuTimeLimit,
                quantities,
                reporter,
                strategies.qp_solver.as_ref(),
                started,
            );
        }

        // c. Aggregation refresh.
        if *options.try_aggregation() && !switched_to_full {
            let omega = strategies.qp_solver.dual_solution_omega().to_vec();
            if omega.len() == bundle_agg.len() {
                let mut g_omega = DVector::zeros(n);
                let mut b_omega = 0.0;
                for ((w, g_i), b_i) in omega.iter().zip(bundle_agg.g.iter()).zip(bundle_agg.b.iter()) {
                    g_omega += g_i.as_ref() * *w;
                    b_omega += w * b_i;
                }
                bundle_agg = Bundle::seed(Rc::clone(&gradient_x_k), f_x_k);
                bundle_agg.push(Rc::new(g_omega), b_omega);
            }
        }

        // d. Bundle additions.
        let mut g_new: Vec<Rc<DVector<Floating>>> = Vec::new();
        let mut b_new: Vec<Floating> = Vec::new();
        let d_inf = quantities.direction.inf_norm();

        if *options.add_far_points() || d_inf <= rho {
            if quantities.trial_iterate.g().is_none() {
                quantities.trial_iterate.evaluate_gradient(oracle);
            }
            if let (Some(f_trial), Some(g_trial)) = (
                *quantities.trial_iterate.f(),
                quantities.trial_iterate.g().clone(),
            ) {
                let b_trial = downshifted_linear_term(
                    f_trial,
                    &g_trial,
                    &x_k,
                    quantities.trial_iterate.position(),
                    f_x_k,
                    kappa,
                );
                g_new.push(Rc::clone(&g_trial));
                b_new.push(b_trial);
                bundle.push(Rc::clone(&g_trial), b_trial);
                if *options.try_aggregation() && !switched_to_full {
                    bundle_agg.push(Rc::clone(&g_trial), b_trial);
                }
                let pushed = quantities.trial_iterate.clone();
                quantities.push_point(pushed);
            }
        }

        // Shortened step.
        let mut accepted_via_shortened = false;
        if *options.try_shortened_step() && d_inf > 0.0 {
            let alpha_s = *options.shortened_stepsize() * rho.min(d_inf) / d_inf;
            let mut shortened_iterate =
                Iterate::new(linear_combination(1.0, &x_k, alpha_s, &quantities.direction));
            if shortened_iterate.evaluate_objective(oracle) {
                let f_short = shortened_iterate.f().expect("just evaluated above");
                if sufficient_decrease(options, alpha_s, f_short, f_x_k, strategies.qp_solver.as_ref()) {
                    quantities.direction = &quantities.direction * alpha_s;
                    quantities.trial_iterate = shortened_iterate;
                    accepted_via_shortened = true;
                } else if shortened_iterate.evaluate_gradient(oracle) {
                    let g_short = shortened_iterate.g().clone().expect("just evaluated above");
                    let b_short = downshifted_linear_term(
                        f_short,
                        &g_short,
                        &x_k,
                        shortened_iterate.position(),
                        f_x_k,
                        kappa,
                    );
                    g_new.push(Rc::clone(&g_short));
                    b_new.push(b_short);
                    bundle.push(Rc::clone(&g_short), b_short);
                    if *options.try_aggregation() && !switched_to_full {
                        bundle_agg.push(Rc::clone(&g_short), b_short);
                    }
                }
            }
        }
        if accepted_via_shortened {
            return finish(
                DirectionStatus::Success,
                quantities,
                reporter,
                strategies.qp_solver.as_ref(),
                started,
            );
        }

        // e. Re-solve QP.
        if *options.try_aggregation() && !switched_to_full {
            if (quantities.point_set.len() as Floating) < options.aggregation_threshold_count(n) {
                strategies
                    .qp_solver
                    .set_vector_list(bundle_agg.g.clone(), bundle_agg.b.clone());
                strategies
                    .qp_solver
                    .solve_qp(strategies.hessian_update.inverse_hessian());
            } else {
                strategies
                    .qp_solver
                    .set_vector_list(bundle.g.clone(), bundle.b.clone());
                strategies
                    .qp_solver
                    .solve_qp(strategies.hessian_update.inverse_hessian());
                switched_to_full = true;
            }
        } else {
            strategies.qp_solver.add_data(g_new, b_new);
            strategies
                .qp_solver
                .solve_qp_hot(strategies.hessian_update.inverse_hessian());
        }
        quantities.counters.bump_qp();

        // f. Convert solution to step.
        convert_qp_solution_to_step(quantities, strategies.qp_solver.as_ref(), &x_k);

        // g. QP failure recovery.
        if strategies.qp_solver.status() != QpStatus::Success {
            if *options.fail_on_qp_failure() {
                return finish(
                    DirectionStatus::QpFailure,
                    quantities,
                    reporter,
                    strategies.qp_solver.as_ref(),
                    started,
                );
            }
            warn!(target: "bundle", "QP solve failed mid-loop; recovering with the seed cut only");
            bundle = Bundle::seed(Rc::clone(&gradient_x_k), f_x_k);
            bundle_agg = bundle.clone();
            switched_to_full = false;
            strategies
                .qp_solver
                .set_vector_list(bundle.g.clone(), bundle.b.clone());
            strategies
                .qp_solver
                .solve_qp(strategies.hessian_update.inverse_hessian());
            quantities.counters.bump_qp();
            convert_qp_solution_to_step(quantities, strategies.qp_solver.as_ref(), &x_k);
            debug!(target: "bundle", "recovery solve reseeded the bundle to 1 cut");
        }
    }
}
